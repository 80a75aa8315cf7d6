//! Hit and pickup particle bursts
//!
//! Purely cosmetic. Particles use their own RNG so they never disturb the
//! simulation's random stream.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{PLAYER_Y, START_LANE};
use crate::lane_x;
use crate::sim::{GameEvent, SnackOutcome};
use crate::sink::FeedbackSink;

const GOOD_BURST: usize = 16;
const BAD_BURST: usize = 22;
const GRAVITY: f32 = 900.0;
/// Hard cap so a burst storm cannot grow without bound
pub const MAX_PARTICLES: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds alive
    pub age: f32,
    /// Seconds until gone
    pub life: f32,
    /// Green (good) or red (bad)
    pub good: bool,
}

impl Particle {
    /// Remaining opacity, 1 at birth fading to 0
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.life).clamp(0.0, 1.0)
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    /// Last known player centre, for bursts that come from the player
    player_at: Vec2,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            player_at: Vec2::new(lane_x(START_LANE), PLAYER_Y),
        }
    }

    /// Track where the player is drawn
    pub fn follow(&mut self, player: Vec2) {
        self.player_at = player;
    }

    /// Spray particles out from a point
    pub fn burst(&mut self, at: Vec2, good: bool) {
        let n = if good { GOOD_BURST } else { BAD_BURST };
        for _ in 0..n {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed: f32 = self.rng.random_range(120.0..520.0);
            let kick: f32 = self.rng.random_range(0.0..240.0);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed - Vec2::new(0.0, kick),
                age: 0.0,
                life: self.rng.random_range(0.35..0.75),
                good,
            });
        }
    }

    /// Age, move and cull
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|p| {
            p.age += dt;
            if p.age >= p.life {
                return false;
            }
            p.pos += p.vel * dt;
            p.vel.y += GRAVITY * dt;
            true
        });
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl FeedbackSink for ParticleSystem {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::CollectibleHit { lane, y, .. } | GameEvent::ObstacleSmashed { lane, y, .. } => {
                self.burst(Vec2::new(lane_x(*lane), *y), true);
            }
            GameEvent::ObstacleHit { lane, y, .. } => {
                self.burst(Vec2::new(lane_x(*lane), *y), false);
            }
            GameEvent::SnackUsed {
                outcome: SnackOutcome::ExtraLife,
            } => {
                self.burst(self.player_at - Vec2::new(0.0, 20.0), true);
            }
            // New stop, clean road
            GameEvent::LevelAnnounced { .. } => self.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Kind;

    #[test]
    fn test_burst_sizes() {
        let mut ps = ParticleSystem::new(1);
        ps.burst(Vec2::ZERO, true);
        assert_eq!(ps.len(), GOOD_BURST);
        ps.burst(Vec2::ZERO, false);
        assert_eq!(ps.len(), GOOD_BURST + BAD_BURST);
    }

    #[test]
    fn test_particles_expire() {
        let mut ps = ParticleSystem::new(2);
        ps.burst(Vec2::new(100.0, 100.0), true);
        ps.update(0.1);
        assert_eq!(ps.len(), GOOD_BURST);
        assert!(ps.particles().iter().all(|p| p.fade() < 1.0));
        for _ in 0..10 {
            ps.update(0.1);
        }
        assert!(ps.is_empty());
    }

    #[test]
    fn test_capped() {
        let mut ps = ParticleSystem::new(3);
        for _ in 0..100 {
            ps.burst(Vec2::ZERO, false);
        }
        assert_eq!(ps.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_reacts_to_events() {
        let mut ps = ParticleSystem::new(4);
        ps.on_event(&GameEvent::ObstacleHit {
            kind: Kind::Cone,
            lane: 0,
            y: 900.0,
            lives_left: 1,
        });
        assert_eq!(ps.len(), BAD_BURST);
        assert!(ps.particles().iter().all(|p| !p.good && p.pos.x == lane_x(0)));

        ps.on_event(&GameEvent::LevelAnnounced {
            index: 1,
            name: String::new(),
            blurb: String::new(),
        });
        assert!(ps.is_empty());
    }

    #[test]
    fn test_extra_life_bursts_at_player() {
        let mut ps = ParticleSystem::new(5);
        ps.follow(Vec2::new(lane_x(2), PLAYER_Y));
        ps.on_event(&GameEvent::SnackUsed {
            outcome: SnackOutcome::ExtraLife,
        });
        assert_eq!(ps.len(), GOOD_BURST);
        assert!(ps.particles().iter().all(|p| {
            p.good && p.pos == Vec2::new(lane_x(2), PLAYER_Y - 20.0)
        }));

        ps.on_event(&GameEvent::SnackUsed {
            outcome: SnackOutcome::Wasted,
        });
        ps.on_event(&GameEvent::SnackUsed {
            outcome: SnackOutcome::NoTokens,
        });
        assert_eq!(ps.len(), GOOD_BURST);
    }
}
