//! World Swipe - a three-lane swipe runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring, stops)
//! - `game`: Game state machine that gates the simulation and feeds the frontend
//! - `sink`: Interfaces the simulation reports to (presentation, audio, toasts, HUD)
//! - `gesture`: Swipe/tap classification into player commands
//! - `audio`: Procedural tones for gameplay events
//! - `renderer`: Canvas drawing and particle bursts
//! - `settings`: Player preferences and run configuration

pub mod audio;
pub mod error;
pub mod game;
pub mod gesture;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sink;

pub use error::ConfigError;
pub use game::Game;
pub use settings::{GameConfig, Settings};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (canvas pixels, portrait)
    pub const FIELD_WIDTH: f32 = 720.0;
    pub const FIELD_HEIGHT: f32 = 1280.0;

    /// Number of lanes on the road
    pub const LANE_COUNT: usize = 3;
    /// Lane center offsets from the road center
    pub const LANE_OFFSETS: [f32; LANE_COUNT] = [-170.0, 0.0, 170.0];
    /// Lane the player starts every run in
    pub const START_LANE: usize = 1;

    /// Vertical position of the player sprite
    pub const PLAYER_Y: f32 = FIELD_HEIGHT * 0.78;
    /// Player collision radius
    pub const PLAYER_RADIUS: f32 = 46.0;
    /// Display easing toward the lane target, per 60 Hz frame
    pub const PLAYER_EASE: f32 = 0.18;

    /// Entities appear just above the visible road
    pub const SPAWN_Y: f32 = FIELD_HEIGHT * 0.50 - 80.0;
    /// Entities past this line are gone
    pub const DESPAWN_Y: f32 = FIELD_HEIGHT + 120.0;
    /// Collision band around the player row
    pub const HIT_BAND_ABOVE: f32 = 20.0;
    pub const HIT_BAND_BELOW: f32 = 60.0;
    /// Entity collision radius as a fraction of its size
    pub const ENTITY_RADIUS_FACTOR: f32 = 0.45;

    /// Lives at the start of a run, and the cap
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 3;
    /// Boost keeps the player invulnerable for at least this long (seconds)
    pub const BOOST_DURATION: f32 = 0.65;

    /// Default stop length (seconds)
    pub const STOP_DURATION: f32 = 22.0;
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Scoring
    pub const SCORE_TOKEN: f64 = 40.0;
    pub const SCORE_SOUVENIR: f64 = 50.0;
    pub const SCORE_SMASH: f64 = 10.0;
    pub const PENALTY_MISSED_GOOD: f64 = 5.0;
    pub const PASSIVE_SCORE_BASE: f64 = 25.0;
    pub const PASSIVE_SCORE_PER_STOP: f64 = 3.0;
}

/// Horizontal center of a lane (clamped to the outer lanes)
#[inline]
pub fn lane_x(lane: usize) -> f32 {
    use consts::*;
    FIELD_WIDTH / 2.0 + LANE_OFFSETS[lane.min(LANE_COUNT - 1)]
}
