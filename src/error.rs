//! Setup errors
//!
//! The simulation itself has no failure modes. Everything that can go wrong
//! happens while loading or validating configuration, before a run starts.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The trip has no stops
    NoStops,
    InvalidStopDuration { index: usize, value: f32 },
    InvalidFrameStep { value: f32 },
    /// Settings JSON did not parse
    Parse(String),
    /// Settings file could not be read
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoStops => write!(f, "stop list is empty: a trip needs at least one stop"),
            Self::InvalidStopDuration { index, value } => write!(
                f,
                "stop {index} has invalid duration {value} (must be finite and > 0)"
            ),
            Self::InvalidFrameStep { value } => write!(
                f,
                "max frame step {value} is invalid (must be finite and > 0)"
            ),
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
            Self::Io(msg) => write!(f, "settings read error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ConfigError::NoStops.to_string(),
            "stop list is empty: a trip needs at least one stop"
        );
        assert_eq!(
            ConfigError::InvalidStopDuration {
                index: 2,
                value: -1.0
            }
            .to_string(),
            "stop 2 has invalid duration -1 (must be finite and > 0)"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(ConfigError::from(err), ConfigError::Parse(_)));
    }
}
