//! Swipe and tap classification
//!
//! Pointer input (touch or mouse) is reduced to a start point and an end
//! point in playfield coordinates, then classified into a single command.

use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{Command, LaneDirection};

/// Movement below this on both axes is a tap (playfield pixels)
pub const SWIPE_THRESHOLD: f32 = 28.0;
/// Taps shorter than this boost; longer presses snack (milliseconds)
pub const QUICK_TAP_MS: f64 = 260.0;

/// Classify a finished gesture by its displacement and duration
pub fn classify(delta: Vec2, elapsed_ms: f64) -> Command {
    let (adx, ady) = (delta.x.abs(), delta.y.abs());

    if adx < SWIPE_THRESHOLD && ady < SWIPE_THRESHOLD {
        return if elapsed_ms < QUICK_TAP_MS {
            Command::Boost
        } else {
            Command::UseSnack
        };
    }

    if adx > ady {
        if delta.x > 0.0 {
            Command::ShiftLane(LaneDirection::Right)
        } else {
            Command::ShiftLane(LaneDirection::Left)
        }
    } else if delta.y < 0.0 {
        // Swipe up
        Command::Boost
    } else {
        Command::UseSnack
    }
}

/// Map a client-space point into playfield coordinates given the canvas'
/// on-screen rectangle
pub fn to_field(client: Vec2, rect_origin: Vec2, rect_size: Vec2) -> Vec2 {
    let scale = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) / rect_size.max(Vec2::ONE);
    (client - rect_origin) * scale
}

/// Tracks one pointer from press to release
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    start: Option<(Vec2, f64)>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down
    pub fn begin(&mut self, pos: Vec2, now_ms: f64) {
        self.start = Some((pos, now_ms));
    }

    /// Pointer came up. Returns the gesture's command, or `None` if no press
    /// was in progress.
    pub fn end(&mut self, pos: Vec2, now_ms: f64) -> Option<Command> {
        let (start, t0) = self.start.take()?;
        Some(classify(pos - start, now_ms - t0))
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_taps() {
        assert_eq!(classify(Vec2::new(3.0, -5.0), 120.0), Command::Boost);
        assert_eq!(classify(Vec2::ZERO, 400.0), Command::UseSnack);
        assert_eq!(classify(Vec2::new(27.9, 27.9), 259.0), Command::Boost);
    }

    #[test]
    fn test_swipes() {
        assert_eq!(
            classify(Vec2::new(80.0, 10.0), 100.0),
            Command::ShiftLane(LaneDirection::Right)
        );
        assert_eq!(
            classify(Vec2::new(-40.0, 30.0), 500.0),
            Command::ShiftLane(LaneDirection::Left)
        );
        assert_eq!(classify(Vec2::new(5.0, -90.0), 100.0), Command::Boost);
        assert_eq!(classify(Vec2::new(-5.0, 90.0), 100.0), Command::UseSnack);
    }

    #[test]
    fn test_diagonal_tie_is_vertical() {
        assert_eq!(classify(Vec2::new(50.0, 50.0), 100.0), Command::UseSnack);
        assert_eq!(classify(Vec2::new(50.0, -50.0), 100.0), Command::Boost);
    }

    #[test]
    fn test_tracker_lifecycle() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.end(Vec2::ZERO, 0.0), None);

        tracker.begin(Vec2::new(300.0, 900.0), 1000.0);
        assert!(tracker.is_active());
        assert_eq!(
            tracker.end(Vec2::new(150.0, 910.0), 1100.0),
            Some(Command::ShiftLane(LaneDirection::Left))
        );
        assert!(!tracker.is_active());
        assert_eq!(tracker.end(Vec2::new(150.0, 910.0), 1200.0), None);
    }

    #[test]
    fn test_to_field_scales_canvas() {
        let p = to_field(
            Vec2::new(190.0, 340.0),
            Vec2::new(10.0, 20.0),
            Vec2::new(360.0, 640.0),
        );
        assert_eq!(p, Vec2::new(360.0, 640.0));
    }

    proptest! {
        #[test]
        fn prop_gestures_never_start_or_restart(
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
            ms in 0.0f64..2000.0,
        ) {
            let cmd = classify(Vec2::new(dx, dy), ms);
            prop_assert!(cmd.is_gameplay());
        }
    }
}
