//! Simulation state and core entity types
//!
//! A single owned [`SimulationState`] holds everything a run mutates. The game
//! state machine replaces it wholesale on (re)start instead of patching fields.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::command::LaneDirection;
use super::event::GameEvent;
use super::level::LevelSequencer;
use super::spawn::Spawner;
use crate::consts::*;
use crate::lane_x;

/// Top-level phase of the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/attract screen, no run in progress
    Idle,
    /// Active gameplay
    Running,
    /// Lives ran out
    GameOver,
    /// Last stop completed
    Victory,
}

impl GamePhase {
    /// Whether the simulation core runs in this phase
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }
}

/// Whether touching an entity helps or hurts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Good,
    Bad,
}

/// What an entity is, drawn from the current stop's palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    // Obstacles
    Cone,
    Taxi,
    Handbag,
    Scooter,
    Suitcase,
    Pigeon,
    Speaker,
    ConfettiBomb,
    Beachball,
    Pepper,
    Rickshaw,
    Monkey,
    Tuk,
    // Collectibles
    Palm,
    Film,
    Shoe,
    Scarf,
    Croissant,
    Train,
    Kippah,
    Confetti,
    Sunglasses,
    Friend,
    Curry,
    Chai,
    Temple,
    Lotus,
    Flag,
    /// Bankable token, redeemable for a life
    Snack,
}

impl Kind {
    /// Short identifier used in logs and events
    pub fn label(self) -> &'static str {
        match self {
            Kind::Cone => "cone",
            Kind::Taxi => "taxi",
            Kind::Handbag => "handbag",
            Kind::Scooter => "scooter",
            Kind::Suitcase => "suitcase",
            Kind::Pigeon => "pigeon",
            Kind::Speaker => "speaker",
            Kind::ConfettiBomb => "confettiBomb",
            Kind::Beachball => "beachball",
            Kind::Pepper => "pepper",
            Kind::Rickshaw => "rickshaw",
            Kind::Monkey => "monkey",
            Kind::Tuk => "tuk",
            Kind::Palm => "palm",
            Kind::Film => "film",
            Kind::Shoe => "shoe",
            Kind::Scarf => "scarf",
            Kind::Croissant => "croissant",
            Kind::Train => "train",
            Kind::Kippah => "kippah",
            Kind::Confetti => "confetti",
            Kind::Sunglasses => "sunglasses",
            Kind::Friend => "friend",
            Kind::Curry => "curry",
            Kind::Chai => "chai",
            Kind::Temple => "temple",
            Kind::Lotus => "lotus",
            Kind::Flag => "flag",
            Kind::Snack => "snack",
        }
    }

    /// Emoji drawn on the entity badge
    pub fn glyph(self) -> &'static str {
        match self {
            Kind::Cone => "🚧",
            Kind::Taxi => "🚕",
            Kind::Handbag => "👜",
            Kind::Scooter => "🛵",
            Kind::Suitcase => "🧳",
            Kind::Pigeon => "🕊️",
            Kind::Speaker => "🔊",
            Kind::ConfettiBomb => "💥",
            Kind::Beachball => "🏐",
            Kind::Pepper => "🌶️",
            Kind::Rickshaw | Kind::Tuk => "🛺",
            Kind::Monkey => "🐒",
            Kind::Palm => "🌴",
            Kind::Film => "🎬",
            Kind::Shoe => "👟",
            Kind::Scarf => "🧣",
            Kind::Croissant => "🥐",
            Kind::Train => "🚆",
            Kind::Kippah => "🧢",
            Kind::Confetti => "🎉",
            Kind::Sunglasses => "🕶️",
            Kind::Friend => "🤝",
            Kind::Curry => "🍛",
            Kind::Chai => "🫖",
            Kind::Temple => "🛕",
            Kind::Lotus => "🪷",
            Kind::Flag => "🏁",
            Kind::Snack => "🍎",
        }
    }
}

/// The player sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Logical lane (canonical for input and collisions)
    pub lane: usize,
    /// Displayed x, eases toward the lane center
    pub x: f32,
    /// Row the player runs on
    pub y: f32,
    /// Invulnerability time remaining (seconds)
    pub invulnerable: f32,
    /// Banked snack tokens
    pub tokens: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            lane: START_LANE,
            x: lane_x(START_LANE),
            y: PLAYER_Y,
            invulnerable: 0.0,
            tokens: 0,
        }
    }
}

impl Player {
    /// Move one lane, clamped to the road. Returns true if the lane changed.
    pub fn shift_lane(&mut self, direction: LaneDirection) -> bool {
        let target = (self.lane as isize + direction.delta()).clamp(0, LANE_COUNT as isize - 1);
        let changed = target as usize != self.lane;
        self.lane = target as usize;
        changed
    }

    /// Raise invulnerability to at least the boost duration (never stacks)
    pub fn boost(&mut self) {
        self.invulnerable = self.invulnerable.max(BOOST_DURATION);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Count down invulnerability, floored at zero
    pub fn decay_invulnerability(&mut self, dt: f32) {
        self.invulnerable = (self.invulnerable - dt).max(0.0);
    }

    /// Slide the displayed x toward the lane center
    pub fn ease_toward_lane(&mut self, dt: f32) {
        let target = lane_x(self.lane);
        // Frame-rate independent version of a fixed 60 Hz lerp
        let blend = 1.0 - (1.0 - PLAYER_EASE).powf(dt * 60.0);
        self.x += (target - self.x) * blend;
    }

    /// Collision center (logical lane, not the eased display x)
    pub fn hit_center(&self) -> Vec2 {
        Vec2::new(lane_x(self.lane), self.y)
    }
}

/// An obstacle or collectible on the road
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub lane: usize,
    /// Progress down the road (pixels, grows toward the player)
    pub y: f32,
    pub category: Category,
    pub kind: Kind,
    /// Pixels per second, fixed for the entity's lifetime
    pub speed: f32,
    /// Sprite size; the collision radius derives from it
    pub size: f32,
}

impl Entity {
    pub fn is_good(&self) -> bool {
        self.category == Category::Good
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(lane_x(self.lane), self.y)
    }

    pub fn hit_radius(&self) -> f32 {
        self.size * ENTITY_RADIUS_FACTOR
    }
}

/// Complete per-run simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed this run's RNG was created from
    pub seed: u64,
    /// Score (fractional from passive accrual, displayed floored)
    pub score: f64,
    pub lives: u8,
    /// Seconds simulated this run
    pub time: f32,
    pub player: Player,
    /// Active entities in spawn order
    pub entities: Vec<Entity>,
    pub level: LevelSequencer,
    pub spawner: Spawner,
    /// Random source for spawns
    pub rng: Pcg32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Fresh run state positioned at the first stop. No events are emitted
    /// until [`SimulationState::begin_stop`] is called.
    pub fn new(mut level: LevelSequencer, seed: u64) -> Self {
        level.restart();
        Self {
            seed,
            score: 0.0,
            lives: START_LIVES,
            time: 0.0,
            player: Player::default(),
            entities: Vec::new(),
            level,
            spawner: Spawner::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Enter a stop: clear the road, reset stop timers, announce it
    pub fn begin_stop(&mut self, index: usize) {
        self.level.enter(index);
        self.entities.clear();
        self.spawner.reset();

        let stop = self.level.current();
        log::info!(
            "Stop {}/{}: {}",
            self.level.index() + 1,
            self.level.len(),
            stop.name
        );
        self.events.push(GameEvent::LevelAnnounced {
            index: self.level.index(),
            name: stop.name.clone(),
            blurb: stop.blurb.clone(),
        });
    }

    /// Add to the score
    pub fn award(&mut self, points: f64) {
        self.score += points;
    }

    /// Subtract from the score, never going below zero
    pub fn penalize(&mut self, points: f64) {
        self.score = (self.score - points).max(0.0);
    }

    /// Score as shown on the HUD
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::default_stops;

    fn state() -> SimulationState {
        let level = LevelSequencer::new(default_stops()).unwrap();
        SimulationState::new(level, 7)
    }

    #[test]
    fn test_new_state_defaults() {
        let s = state();
        assert_eq!(s.lives, START_LIVES);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.player.lane, START_LANE);
        assert_eq!(s.player.tokens, 0);
        assert_eq!(s.level.index(), 0);
        assert!(s.entities.is_empty());
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_shift_lane_clamps() {
        let mut p = Player::default();
        assert!(p.shift_lane(LaneDirection::Left));
        assert_eq!(p.lane, 0);
        assert!(!p.shift_lane(LaneDirection::Left));
        assert_eq!(p.lane, 0);
        assert!(p.shift_lane(LaneDirection::Right));
        assert!(p.shift_lane(LaneDirection::Right));
        assert!(!p.shift_lane(LaneDirection::Right));
        assert_eq!(p.lane, LANE_COUNT - 1);
    }

    #[test]
    fn test_boost_raises_but_never_stacks() {
        let mut p = Player::default();
        p.boost();
        assert_eq!(p.invulnerable, BOOST_DURATION);
        p.boost();
        assert_eq!(p.invulnerable, BOOST_DURATION);

        p.invulnerable = 2.0;
        p.boost();
        assert_eq!(p.invulnerable, 2.0);
    }

    #[test]
    fn test_invulnerability_floors_at_zero() {
        let mut p = Player::default();
        p.boost();
        p.decay_invulnerability(10.0);
        assert_eq!(p.invulnerable, 0.0);
        assert!(!p.is_invulnerable());
    }

    #[test]
    fn test_display_x_eases_toward_lane() {
        let mut p = Player::default();
        p.shift_lane(LaneDirection::Right);
        let start = p.x;
        p.ease_toward_lane(1.0 / 60.0);
        let expected = start + (lane_x(2) - start) * PLAYER_EASE;
        assert!((p.x - expected).abs() < 0.01);
        for _ in 0..120 {
            p.ease_toward_lane(1.0 / 60.0);
        }
        assert!((p.x - lane_x(2)).abs() < 0.5);
        // Collisions follow the logical lane immediately
        assert_eq!(p.hit_center().x, lane_x(2));
    }

    #[test]
    fn test_penalize_floors_score() {
        let mut s = state();
        s.award(3.0);
        s.penalize(5.0);
        assert_eq!(s.score, 0.0);
    }

    #[test]
    fn test_begin_stop_announces_and_clears() {
        let mut s = state();
        let id = s.next_entity_id();
        s.entities.push(Entity {
            id,
            lane: 0,
            y: 100.0,
            category: Category::Bad,
            kind: Kind::Cone,
            speed: 400.0,
            size: 60.0,
        });
        s.begin_stop(2);
        assert!(s.entities.is_empty());
        assert_eq!(s.level.index(), 2);
        assert!(matches!(
            s.drain_events().as_slice(),
            [GameEvent::LevelAnnounced { index: 2, .. }]
        ));
    }
}
