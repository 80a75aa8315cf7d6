//! Gameplay events reported to the frontend
//!
//! Events are purely observational: audio, toasts and particles react to
//! them, and nothing they do feeds back into the simulation.

use serde::{Deserialize, Serialize};

use super::state::Kind;

/// What happened when the player asked for a snack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnackOutcome {
    /// Token spent, one life gained
    ExtraLife,
    /// Token spent at full lives
    Wasted,
    /// Nothing to eat
    NoTokens,
}

/// A discrete thing that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaneChanged { lane: usize },
    BoostActivated,
    SnackUsed { outcome: SnackOutcome },
    /// Good entity picked up at (lane, y)
    CollectibleHit {
        kind: Kind,
        lane: usize,
        y: f32,
        points: u32,
    },
    /// Bad entity destroyed while invulnerable
    ObstacleSmashed { kind: Kind, lane: usize, y: f32 },
    /// Bad entity cost a life
    ObstacleHit {
        kind: Kind,
        lane: usize,
        y: f32,
        lives_left: u8,
    },
    LevelAnnounced {
        index: usize,
        name: String,
        blurb: String,
    },
    LevelComplete { index: usize, final_stop: bool },
    GameOver { score: u64 },
    MuteToggled { muted: bool },
}

impl GameEvent {
    /// Stable event name for logs and frontends
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::LaneChanged { .. } => "lane-changed",
            GameEvent::BoostActivated => "boost-activated",
            GameEvent::SnackUsed { .. } => "snack-used",
            GameEvent::CollectibleHit { .. } => "collectible-hit",
            GameEvent::ObstacleSmashed { .. } => "obstacle-smashed",
            GameEvent::ObstacleHit { .. } => "obstacle-hit",
            GameEvent::LevelAnnounced { .. } => "level-announced",
            GameEvent::LevelComplete { .. } => "level-complete",
            GameEvent::GameOver { .. } => "game-over",
            GameEvent::MuteToggled { .. } => "mute-toggled",
        }
    }

    /// Short notification text, if this event shows a toast
    pub fn toast(&self) -> Option<String> {
        let msg = match self {
            GameEvent::LevelAnnounced { name, blurb, .. } => format!("📍 {name}: {blurb}"),
            GameEvent::BoostActivated => "⬆️ BOOST! (briefly invincible)".to_string(),
            GameEvent::SnackUsed { outcome } => match outcome {
                SnackOutcome::ExtraLife => "⬇️ Snack! +1 life".to_string(),
                SnackOutcome::Wasted => {
                    "⬇️ Snack! (delicious but you were already full lives)".to_string()
                }
                SnackOutcome::NoTokens => {
                    "⬇️ No snack tokens yet. Collect 🍎 to snack!".to_string()
                }
            },
            GameEvent::CollectibleHit { kind, .. } => {
                if *kind == Kind::Snack {
                    "🍎 Snack token collected!".to_string()
                } else {
                    "✨ Souvenir collected!".to_string()
                }
            }
            GameEvent::ObstacleHit { .. } => "💥 Oof! Suitcase impact!".to_string(),
            GameEvent::LaneChanged { .. }
            | GameEvent::ObstacleSmashed { .. }
            | GameEvent::LevelComplete { .. }
            | GameEvent::GameOver { .. }
            | GameEvent::MuteToggled { .. } => return None,
        };
        Some(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::BoostActivated.name(), "boost-activated");
        assert_eq!(
            GameEvent::LevelComplete {
                index: 0,
                final_stop: true
            }
            .name(),
            "level-complete"
        );
    }

    #[test]
    fn test_toasts() {
        let token = GameEvent::CollectibleHit {
            kind: Kind::Snack,
            lane: 1,
            y: 0.0,
            points: 40,
        };
        assert_eq!(token.toast().as_deref(), Some("🍎 Snack token collected!"));

        let announce = GameEvent::LevelAnnounced {
            index: 0,
            name: "Los Angeles".into(),
            blurb: "Home base!".into(),
        };
        assert_eq!(
            announce.toast().as_deref(),
            Some("📍 Los Angeles: Home base!")
        );

        assert_eq!(GameEvent::LaneChanged { lane: 0 }.toast(), None);
    }
}
