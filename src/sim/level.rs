//! Stops and the level sequencer
//!
//! A run is a fixed, ordered trip of stops. Each stop lasts a fixed number of
//! seconds; when its clock runs out the sequencer moves to the next stop, or
//! reports the trip finished after the last one.

use serde::{Deserialize, Serialize};

use crate::consts::STOP_DURATION;
use crate::error::ConfigError;

/// Visual and spawn theme of a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    La,
    Milan,
    Nice,
    Haifa,
    Tlv,
    India,
    Bkk,
    La2,
    /// Any tag this build does not know; spawns from the fallback palette
    #[serde(other)]
    Unknown,
}

fn default_stop_duration() -> f32 {
    STOP_DURATION
}

/// One themed segment of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub name: String,
    /// Flavor text shown when the stop is announced
    pub blurb: String,
    pub theme: Theme,
    /// Seconds until the stop is complete
    #[serde(default = "default_stop_duration")]
    pub duration: f32,
}

impl Stop {
    pub fn new(name: &str, blurb: &str, theme: Theme) -> Self {
        Self {
            name: name.to_string(),
            blurb: blurb.to_string(),
            theme,
            duration: STOP_DURATION,
        }
    }
}

/// The standard eight-stop trip
pub fn default_stops() -> Vec<Stop> {
    vec![
        Stop::new(
            "Los Angeles",
            "Home base! Avoid traffic cones and collect 🌴 souvenirs.",
            Theme::La,
        ),
        Stop::new(
            "Milan, Italy",
            "Fashion sprint! Dodge 👜 handbags flying off scooters.",
            Theme::Milan,
        ),
        Stop::new(
            "Nice, France",
            "Train time! Avoid runaway 🧳 suitcases and collect 🥐.",
            Theme::Nice,
        ),
        Stop::new(
            "Haifa, Israel",
            "Bar mitzvah mode for Reuben! Collect 🎉 confetti & avoid the DJ's giant speakers.",
            Theme::Haifa,
        ),
        Stop::new(
            "Tel Aviv",
            "Old friends! Collect 🕶️ and dodge 🛴 scooters.",
            Theme::Tlv,
        ),
        Stop::new(
            "India",
            "Eat everything! Collect 🍛, dodge 🔥 spicy peppers.",
            Theme::India,
        ),
        Stop::new(
            "Bangkok, Thailand",
            "Temple awe! Collect 🛕 charms, dodge 🐒 cheeky monkeys.",
            Theme::Bkk,
        ),
        Stop::new(
            "Sunny Los Angeles",
            "Back home! Final dash. Collect 🏁 flags and don't drop the suitcase.",
            Theme::La2,
        ),
    ]
}

/// Result of finishing the current stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAdvance {
    /// Moved on to the stop at this index
    Next(usize),
    /// The last stop is done
    Finished,
}

/// Walks the ordered stop list and tracks time spent in the current stop
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSequencer {
    stops: Vec<Stop>,
    index: usize,
    elapsed: f32,
}

/// Check a stop list before any run can use it
pub fn validate_stops(stops: &[Stop]) -> Result<(), ConfigError> {
    if stops.is_empty() {
        return Err(ConfigError::NoStops);
    }
    for (index, stop) in stops.iter().enumerate() {
        if !stop.duration.is_finite() || stop.duration <= 0.0 {
            return Err(ConfigError::InvalidStopDuration {
                index,
                value: stop.duration,
            });
        }
    }
    Ok(())
}

impl LevelSequencer {
    pub fn new(stops: Vec<Stop>) -> Result<Self, ConfigError> {
        validate_stops(&stops)?;
        Ok(Self {
            stops,
            index: 0,
            elapsed: 0.0,
        })
    }

    /// Back to the first stop with a fresh clock
    pub fn restart(&mut self) {
        self.enter(0);
    }

    /// Jump to a stop (clamped to the last one) with a fresh clock
    pub fn enter(&mut self, index: usize) {
        self.index = index.min(self.stops.len() - 1);
        self.elapsed = 0.0;
    }

    pub fn current(&self) -> &Stop {
        &self.stops[self.index]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.stops.len()
    }

    /// Seconds spent in the current stop
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the current stop completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.current().duration).clamp(0.0, 1.0)
    }

    /// Advance the stop clock
    pub fn advance_time(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Whether the current stop's clock has run out
    pub fn stop_complete(&self) -> bool {
        self.elapsed >= self.current().duration
    }

    /// Move past the current stop
    pub fn advance(&mut self) -> StopAdvance {
        if self.is_last() {
            StopAdvance::Finished
        } else {
            self.enter(self.index + 1);
            StopAdvance::Next(self.index)
        }
    }
}
