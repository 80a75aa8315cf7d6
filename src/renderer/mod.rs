//! Canvas rendering module
//!
//! Draws [`crate::sink::Snapshot`]s onto a 2D canvas in playfield
//! coordinates. The drawing itself is wasm32-only; palettes and particles are
//! portable so they can be tested natively.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod particles;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use particles::{Particle, ParticleSystem};

use crate::sim::Theme;

pub const INK: &str = "rgba(233,237,255,0.92)";
pub const MINT: &str = "rgba(124,247,197,0.95)";
pub const CORAL: &str = "rgba(255,92,122,0.9)";
pub const NIGHT: &str = "#060913";

/// Sky tint at the top of the screen for a stop
pub fn sky_color(theme: Theme) -> &'static str {
    match theme {
        Theme::La | Theme::La2 => "#0b1a3a",
        Theme::Milan => "#1b0f2b",
        Theme::Nice => "#0b2a2a",
        Theme::Haifa => "#232a0d",
        Theme::Tlv => "#1a1030",
        Theme::India => "#2a1308",
        Theme::Bkk => "#071f28",
        Theme::Unknown => "#0b1020",
    }
}
