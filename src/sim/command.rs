//! Typed commands from the input layer
//!
//! Input handlers never touch simulation state. They enqueue a [`Command`] and
//! the game drains the queue once per frame, before any physics runs, so
//! command ordering is deterministic and replayable.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Direction for a lane shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneDirection {
    Left,
    Right,
}

impl LaneDirection {
    /// Signed lane delta
    pub fn delta(self) -> isize {
        match self {
            LaneDirection::Left => -1,
            LaneDirection::Right => 1,
        }
    }
}

/// A discrete player or session command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move one lane left or right
    ShiftLane(LaneDirection),
    /// Brief invulnerability
    Boost,
    /// Spend a snack token on a life
    UseSnack,
    /// Begin a run from the title screen
    Start,
    /// Begin a new run after game over or victory
    Restart,
    /// Toggle audio on/off
    ToggleMute,
}

impl Command {
    /// True for commands that only make sense mid-run
    pub fn is_gameplay(&self) -> bool {
        matches!(
            self,
            Command::ShiftLane(_) | Command::Boost | Command::UseSnack
        )
    }
}

/// FIFO of commands waiting for the next frame
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a command for the next frame
    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Take every pending command in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.pending.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::Start);
        queue.push(Command::ShiftLane(LaneDirection::Left));
        queue.push(Command::Boost);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(
            drained,
            vec![
                Command::Start,
                Command::ShiftLane(LaneDirection::Left),
                Command::Boost
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_gameplay_classification() {
        assert!(Command::UseSnack.is_gameplay());
        assert!(Command::ShiftLane(LaneDirection::Right).is_gameplay());
        assert!(!Command::Restart.is_gameplay());
        assert!(!Command::ToggleMute.is_gameplay());
    }

    #[test]
    fn test_command_json_roundtrip_shape() {
        let json = serde_json::to_string(&Command::ShiftLane(LaneDirection::Right)).unwrap();
        assert_eq!(json, r#"{"ShiftLane":"Right"}"#);
    }
}
