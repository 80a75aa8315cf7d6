//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the caller, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (entities in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod command;
pub mod event;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circles_overlap, in_hit_band};
pub use command::{Command, CommandQueue, LaneDirection};
pub use event::{GameEvent, SnackOutcome};
pub use level::{LevelSequencer, Stop, StopAdvance, Theme, default_stops};
pub use spawn::{Palette, Spawner, palette_for};
pub use state::{Category, Entity, GamePhase, Kind, Player, SimulationState};
pub use tick::{TickOutcome, apply_player_command, tick};
