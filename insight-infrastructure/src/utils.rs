use insight_domain::LocationId;

/// PostgREST `in` filter value, e.g. `in.(1,2,3)`.
pub fn in_filter(ids: &[LocationId]) -> String {
    let joined = ids
        .iter()
        .map(|id| id.0.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({})", joined)
}

pub fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Cuts an error body down to something that fits in a log line.
pub fn truncate_message(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
