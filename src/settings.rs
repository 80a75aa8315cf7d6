//! Game settings and run configuration
//!
//! Preferences (audio) and the trip definition load together from one JSON
//! document. Every field is optional; missing ones take their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::error::ConfigError;
use crate::sim::level::{Stop, default_stops, validate_stops};

/// Seed used when the configuration does not name one
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;

/// What a run plays: the stop list, the RNG seed and the frame-step clamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Base seed; run N plays with `seed + N`
    pub seed: u64,
    /// Largest frame delta the simulation accepts (seconds)
    pub max_frame_dt: f32,
    /// Ordered trip
    pub stops: Vec<Stop>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_frame_dt: MAX_FRAME_DT,
            stops: default_stops(),
        }
    }
}

impl GameConfig {
    /// Reject configurations no run could start from
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::InvalidFrameStep {
                value: self.max_frame_dt,
            });
        }
        validate_stops(&self.stops)
    }
}

/// Player preferences plus run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Start muted
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Run ===
    pub game: GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            game: GameConfig::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.game.validate()?;
        Ok(settings)
    }

    /// Gain applied to every effect tone, 0 when muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Theme;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.game.seed, DEFAULT_SEED);
        assert_eq!(settings.game.stops.len(), 8);
        assert!(settings.game.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "muted": true,
            "game": {
                "seed": 7,
                "stops": [{ "name": "Oslo", "blurb": "Fjords!", "theme": "oslo", "duration": 5 }]
            }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.game.seed, 7);
        assert_eq!(settings.game.max_frame_dt, MAX_FRAME_DT);
        assert_eq!(settings.game.stops[0].theme, Theme::Unknown);
        assert_eq!(settings.game.stops[0].duration, 5.0);
    }

    #[test]
    fn test_rejects_empty_trip() {
        let err = Settings::from_json(r#"{ "game": { "stops": [] } }"#).unwrap_err();
        assert_eq!(err, ConfigError::NoStops);
    }

    #[test]
    fn test_rejects_bad_frame_step() {
        let err = Settings::from_json(r#"{ "game": { "max_frame_dt": 0 } }"#).unwrap_err();
        assert_eq!(err, ConfigError::InvalidFrameStep { value: 0.0 });
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load(std::path::Path::new("/nonexistent/world-swipe.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
