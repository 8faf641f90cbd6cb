// Camera device status value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    Start,
    Stop,
    Unknown,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Start => "START",
            DeviceStatus::Stop => "STOP",
            DeviceStatus::Unknown => "UNKNOWN",
        }
    }

    /// A running camera is stopped; anything else (stopped or unknown) is started.
    pub fn toggled(&self) -> Self {
        match self {
            DeviceStatus::Start => DeviceStatus::Stop,
            DeviceStatus::Stop | DeviceStatus::Unknown => DeviceStatus::Start,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, DeviceStatus::Start)
    }
}

impl From<&str> for DeviceStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "START" => DeviceStatus::Start,
            "STOP" => DeviceStatus::Stop,
            _ => DeviceStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!(DeviceStatus::from("start"), DeviceStatus::Start);
        assert_eq!(DeviceStatus::from(" STOP "), DeviceStatus::Stop);
        assert_eq!(DeviceStatus::from("paused"), DeviceStatus::Unknown);
    }

    #[test]
    fn toggle_starts_unknown_devices() {
        assert_eq!(DeviceStatus::Start.toggled(), DeviceStatus::Stop);
        assert_eq!(DeviceStatus::Stop.toggled(), DeviceStatus::Start);
        assert_eq!(DeviceStatus::Unknown.toggled(), DeviceStatus::Start);
    }

    #[test]
    fn serializes_as_uppercase_wire_value() {
        let json = serde_json::to_string(&DeviceStatus::Stop).expect("serialize");
        assert_eq!(json, "\"STOP\"");
    }
}
