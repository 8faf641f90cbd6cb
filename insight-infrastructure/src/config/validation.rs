use anyhow::{anyhow, Result};

pub fn validate_base_url(name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{} must not be empty", name));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(anyhow!("{} must start with http:// or https://", name));
    }
    Ok(())
}

/// Display offsets are bounded by the real-world range of UTC-12:00..UTC+14:00.
pub fn validate_utc_offset_minutes(value: i32) -> Result<()> {
    if !(-12 * 60..=14 * 60).contains(&value) {
        return Err(anyhow!("utc_offset_minutes out of range: {}", value));
    }
    Ok(())
}
