//! Frontend interfaces
//!
//! The game reports outward through four sinks: a per-frame renderable
//! snapshot, discrete events for audio/particles, short toast strings and the
//! HUD numbers. None of them can reach back into the simulation; input only
//! enters through [`crate::sim::Command`].

use serde::Serialize;

use crate::sim::{Category, GameEvent, GamePhase, Kind, SimulationState, Theme};

/// Receives the full renderable state once per frame
pub trait PresentationSink {
    fn present(&mut self, snapshot: &Snapshot);
}

/// Receives discrete gameplay events (audio, particles, haptics)
pub trait FeedbackSink {
    fn on_event(&mut self, event: &GameEvent);
}

/// Receives short human-readable notifications
pub trait ToastSink {
    fn show(&mut self, message: &str);
}

/// Receives the heads-up numbers
pub trait HudSink {
    fn update(&mut self, hud: &HudState);
}

/// Everything the game loop drives each frame
pub trait Frontend: PresentationSink + FeedbackSink + ToastSink + HudSink {}

impl<T: PresentationSink + FeedbackSink + ToastSink + HudSink> Frontend for T {}

/// Player as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub lane: usize,
    /// Eased display position
    pub x: f32,
    pub y: f32,
    pub invulnerable: bool,
}

/// Entity as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub lane: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub category: Category,
    pub kind: Kind,
    pub glyph: &'static str,
}

/// Title card shown outside of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub subtitle: String,
    pub button: String,
}

impl Overlay {
    /// Card for a phase; `None` while running
    pub fn for_phase(phase: GamePhase, score: u64) -> Option<Self> {
        let (title, subtitle, button) = match phase {
            GamePhase::Running => return None,
            GamePhase::Idle => (
                "Miry's World Swipe".to_string(),
                "Swipe to dodge chaos, collect souvenirs, and keep the suitcase intact."
                    .to_string(),
                "Start Trip",
            ),
            GamePhase::GameOver => (
                "Game Over (Jet Lag Wins)".to_string(),
                format!("Score: {score}. Try again. Miry still has snacks to collect."),
                "Retry",
            ),
            GamePhase::Victory => (
                "Trip Complete!".to_string(),
                format!(
                    "Miry made it home with a score of {score}. The suitcase survives another Sunny Los Angeles."
                ),
                "Play Again",
            ),
        };
        Some(Self {
            title,
            subtitle,
            button: button.to_string(),
        })
    }
}

/// HUD numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudState {
    pub score: u64,
    pub lives: u8,
    pub tokens: u32,
    pub stop_name: String,
    pub stop_blurb: String,
    pub stop_index: usize,
    pub stop_total: usize,
    pub muted: bool,
}

impl HudState {
    pub fn capture(state: &SimulationState, muted: bool) -> Self {
        Self {
            score: state.display_score(),
            lives: state.lives,
            tokens: state.player.tokens,
            stop_name: state.level.current().name.clone(),
            stop_blurb: state.level.current().blurb.clone(),
            stop_index: state.level.index(),
            stop_total: state.level.len(),
            muted,
        }
    }

    /// "Stop i/N: name"
    pub fn caption(&self) -> String {
        format!(
            "Stop {}/{}: {}",
            self.stop_index + 1,
            self.stop_total,
            self.stop_name
        )
    }

    /// Snack token counter
    pub fn tokens_label(&self) -> String {
        format!("🍎 x {}", self.tokens)
    }

    /// Mute button label
    pub fn sound_label(&self) -> &'static str {
        if self.muted { "Sound: Off" } else { "Sound: On" }
    }
}

/// Full renderable state for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub theme: Theme,
    /// Fraction of the current stop completed, in [0, 1]
    pub progress: f32,
    pub player: PlayerView,
    /// Active entities in spawn order
    pub entities: Vec<EntityView>,
    pub hud: HudState,
    /// Seconds spent outside of a run (drives title animations)
    pub attract_time: f32,
    pub overlay: Option<Overlay>,
}

impl Snapshot {
    pub fn capture(
        phase: GamePhase,
        state: &SimulationState,
        attract_time: f32,
        muted: bool,
    ) -> Self {
        let hud = HudState::capture(state, muted);
        let overlay = Overlay::for_phase(phase, hud.score);
        Self {
            phase,
            theme: state.level.current().theme,
            progress: state.level.progress(),
            player: PlayerView {
                lane: state.player.lane,
                x: state.player.x,
                y: state.player.y,
                invulnerable: state.player.is_invulnerable(),
            },
            entities: state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    lane: e.lane,
                    x: e.center().x,
                    y: e.y,
                    size: e.size,
                    category: e.category,
                    kind: e.kind,
                    glyph: e.kind.glyph(),
                })
                .collect(),
            hud,
            attract_time,
            overlay,
        }
    }
}

/// Frontend that writes everything to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogFrontend {
    last_hud: Option<HudState>,
    frames: u64,
}

impl LogFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl PresentationSink for LogFrontend {
    fn present(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        log::trace!(
            "frame {} phase={:?} entities={} progress={:.2}",
            self.frames,
            snapshot.phase,
            snapshot.entities.len(),
            snapshot.progress
        );
    }
}

impl FeedbackSink for LogFrontend {
    fn on_event(&mut self, event: &GameEvent) {
        log::debug!("event {}: {:?}", event.name(), event);
    }
}

impl ToastSink for LogFrontend {
    fn show(&mut self, message: &str) {
        log::info!("{message}");
    }
}

impl HudSink for LogFrontend {
    fn update(&mut self, hud: &HudState) {
        // Only log when something visible changed
        if self.last_hud.as_ref() == Some(hud) {
            return;
        }
        log::debug!(
            "{} | score {} | lives {} | tokens {}",
            hud.caption(),
            hud.score,
            hud.lives,
            hud.tokens
        );
        self.last_hud = Some(hud.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelSequencer, default_stops};
    use crate::sim::state::Entity;

    fn state() -> SimulationState {
        SimulationState::new(LevelSequencer::new(default_stops()).unwrap(), 1)
    }

    #[test]
    fn test_overlay_per_phase() {
        assert_eq!(Overlay::for_phase(GamePhase::Running, 0), None);
        assert_eq!(
            Overlay::for_phase(GamePhase::Idle, 0).unwrap().button,
            "Start Trip"
        );
        let over = Overlay::for_phase(GamePhase::GameOver, 321).unwrap();
        assert_eq!(over.button, "Retry");
        assert!(over.subtitle.starts_with("Score: 321."));
        assert_eq!(
            Overlay::for_phase(GamePhase::Victory, 9).unwrap().button,
            "Play Again"
        );
    }

    #[test]
    fn test_hud_caption() {
        let mut s = state();
        s.begin_stop(2);
        s.score = 41.9;
        let hud = HudState::capture(&s, true);
        assert_eq!(hud.caption(), "Stop 3/8: Nice, France");
        assert_eq!(hud.score, 41);
        assert_eq!(hud.sound_label(), "Sound: Off");
    }

    #[test]
    fn test_hud_carries_blurb_and_tokens() {
        let mut s = state();
        s.begin_stop(2);
        s.player.tokens = 2;
        let hud = HudState::capture(&s, false);
        assert!(hud.stop_blurb.starts_with("Train time!"));
        assert_eq!(hud.tokens, 2);
        assert_eq!(hud.tokens_label(), "🍎 x 2");
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut s = state();
        s.entities.push(Entity {
            id: 5,
            lane: 2,
            y: 700.0,
            category: Category::Good,
            kind: Kind::Palm,
            speed: 500.0,
            size: 48.0,
        });
        s.player.boost();
        let snap = Snapshot::capture(GamePhase::Running, &s, 0.0, false);
        assert_eq!(snap.theme, Theme::La);
        assert!(snap.player.invulnerable);
        assert_eq!(snap.entities.len(), 1);
        assert_eq!(snap.entities[0].x, crate::lane_x(2));
        assert_eq!(snap.entities[0].glyph, "🌴");
        assert_eq!(snap.overlay, None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = Snapshot::capture(GamePhase::Idle, &state(), 1.5, false);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "Idle");
        assert_eq!(json["theme"], "la");
        assert_eq!(json["hud"]["lives"], 3);
    }

    #[test]
    fn test_log_frontend_counts_frames() {
        let mut frontend = LogFrontend::new();
        let snap = Snapshot::capture(GamePhase::Idle, &state(), 0.0, false);
        frontend.present(&snap);
        frontend.present(&snap);
        assert_eq!(frontend.frames(), 2);
    }
}
