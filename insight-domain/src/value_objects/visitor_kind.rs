// Visitor kind value object

use serde::{Deserialize, Serialize};

/// Substring of `visitor_type` that marks a staff interaction.
pub const STAFF_MARKER: &str = "staff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisitorKind {
    Staff,
    Guest,
}

impl From<Option<&str>> for VisitorKind {
    fn from(visitor_type: Option<&str>) -> Self {
        match visitor_type {
            Some(value) if value.to_lowercase().contains(STAFF_MARKER) => VisitorKind::Staff,
            _ => VisitorKind::Guest,
        }
    }
}
