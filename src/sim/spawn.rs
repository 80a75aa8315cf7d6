//! Entity spawning
//!
//! A countdown fires a new entity at a difficulty-scaled interval. What
//! appears (lane, good/bad, kind, speed, size) is rolled from the injected RNG
//! so runs replay exactly for a given seed.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::level::Theme;
use super::state::{Category, Entity, Kind};
use crate::consts::{LANE_COUNT, SPAWN_Y};

/// Chance a spawn is a collectible
pub const GOOD_PROBABILITY: f64 = 0.55;

/// Spawn interval at the first stop, its per-stop reduction, and its floor
pub const BASE_SPAWN_INTERVAL: f32 = 0.85;
pub const SPAWN_INTERVAL_STEP: f32 = 0.06;
pub const MIN_SPAWN_INTERVAL: f32 = 0.35;

/// Speed range at the first stop (pixels/sec) and per-stop growth
pub const SPEED_MIN: f32 = 420.0;
pub const SPEED_MAX: f32 = 640.0;
pub const SPEED_GROWTH_PER_STOP: f32 = 0.06;

/// Size ranges; collectibles run a little smaller
pub const GOOD_SIZE: (f32, f32) = (42.0, 58.0);
pub const BAD_SIZE: (f32, f32) = (50.0, 70.0);

/// Kinds a stop can spawn
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub good: &'static [Kind],
    pub bad: &'static [Kind],
}

/// Palette for a stop theme (unknown themes fall back to snacks and cones)
pub fn palette_for(theme: Theme) -> Palette {
    use Kind::*;
    let (bad, good): (&'static [Kind], &'static [Kind]) = match theme {
        Theme::La => (&[Cone, Taxi], &[Palm, Film, Snack]),
        Theme::Milan => (&[Handbag, Scooter], &[Shoe, Scarf, Snack]),
        Theme::Nice => (&[Suitcase, Pigeon], &[Croissant, Train, Snack]),
        Theme::Haifa => (&[Speaker, ConfettiBomb], &[Kippah, Confetti, Snack]),
        Theme::Tlv => (&[Scooter, Beachball], &[Sunglasses, Friend, Snack]),
        Theme::India => (&[Pepper, Rickshaw], &[Curry, Chai, Snack]),
        Theme::Bkk => (&[Monkey, Tuk], &[Temple, Lotus, Snack]),
        Theme::La2 => (&[Cone, Taxi], &[Flag, Palm, Snack]),
        Theme::Unknown => (&[Cone], &[Snack]),
    };
    Palette { good, bad }
}

/// Seconds between spawns at a given stop
pub fn spawn_interval(stop_index: usize) -> f32 {
    (BASE_SPAWN_INTERVAL - stop_index as f32 * SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL)
}

/// Multiplier applied to the base speed range at a given stop
pub fn speed_scale(stop_index: usize) -> f32 {
    1.0 + stop_index as f32 * SPEED_GROWTH_PER_STOP
}

/// Spawn countdown
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    countdown: f32,
}

impl Spawner {
    /// Zero the countdown so the next tick spawns immediately
    pub fn reset(&mut self) {
        self.countdown = 0.0;
    }

    pub fn countdown(&self) -> f32 {
        self.countdown
    }

    /// Run the countdown. Returns true when an entity is due, re-arming the
    /// timer with the stop's interval.
    pub fn tick(&mut self, dt: f32, stop_index: usize) -> bool {
        self.countdown -= dt;
        if self.countdown <= 0.0 {
            self.countdown = spawn_interval(stop_index);
            true
        } else {
            false
        }
    }
}

/// Roll a new entity at the top of the road
pub fn roll_entity<R: Rng + ?Sized>(rng: &mut R, id: u32, theme: Theme, stop_index: usize) -> Entity {
    let lane = rng.random_range(0..LANE_COUNT);
    let category = if rng.random_bool(GOOD_PROBABILITY) {
        Category::Good
    } else {
        Category::Bad
    };

    let palette = palette_for(theme);
    let choices = match category {
        Category::Good => palette.good,
        Category::Bad => palette.bad,
    };
    // Palettes are static and never empty
    let kind = choices.choose(rng).copied().unwrap_or(Kind::Snack);

    let speed = rng.random_range(SPEED_MIN..SPEED_MAX) * speed_scale(stop_index);
    let (min_size, max_size) = match category {
        Category::Good => GOOD_SIZE,
        Category::Bad => BAD_SIZE,
    };
    let size = rng.random_range(min_size..max_size);

    Entity {
        id,
        lane,
        y: SPAWN_Y,
        category,
        kind,
        speed,
        size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const ALL_THEMES: [Theme; 9] = [
        Theme::La,
        Theme::Milan,
        Theme::Nice,
        Theme::Haifa,
        Theme::Tlv,
        Theme::India,
        Theme::Bkk,
        Theme::La2,
        Theme::Unknown,
    ];

    #[test]
    fn test_spawn_interval_scaling() {
        assert_eq!(spawn_interval(0), 0.85);
        assert!((spawn_interval(3) - 0.67).abs() < 1e-5);
        assert_eq!(spawn_interval(20), MIN_SPAWN_INTERVAL);
    }

    #[test]
    fn test_countdown_fires_immediately_after_reset() {
        let mut spawner = Spawner::default();
        spawner.reset();
        assert!(spawner.tick(0.016, 0));
        assert_eq!(spawner.countdown(), 0.85);
        assert!(!spawner.tick(0.5, 0));
        assert!(spawner.tick(0.4, 0));
        assert_eq!(spawner.countdown(), 0.85);
    }

    #[test]
    fn test_every_palette_has_snacks_and_obstacles() {
        for theme in ALL_THEMES {
            let p = palette_for(theme);
            assert!(p.good.contains(&Kind::Snack), "{theme:?}");
            assert!(!p.bad.is_empty(), "{theme:?}");
            assert!(!p.bad.contains(&Kind::Snack), "{theme:?}");
        }
    }

    #[test]
    fn test_rolled_entities_respect_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for stop in 0..8 {
            for theme in ALL_THEMES {
                let e = roll_entity(&mut rng, 1, theme, stop);
                let palette = palette_for(theme);
                assert!(e.lane < LANE_COUNT);
                assert_eq!(e.y, SPAWN_Y);
                let scale = speed_scale(stop);
                assert!(e.speed >= SPEED_MIN * scale && e.speed <= SPEED_MAX * scale);
                match e.category {
                    Category::Good => {
                        assert!(palette.good.contains(&e.kind));
                        assert!(e.size >= GOOD_SIZE.0 && e.size <= GOOD_SIZE.1);
                    }
                    Category::Bad => {
                        assert!(palette.bad.contains(&e.kind));
                        assert!(e.size >= BAD_SIZE.0 && e.size <= BAD_SIZE.1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_good_ratio_roughly_matches_probability() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let n = 4000;
        let good = (0..n)
            .filter(|_| roll_entity(&mut rng, 0, Theme::La, 0).is_good())
            .count();
        let ratio = good as f64 / n as f64;
        assert!((ratio - GOOD_PROBABILITY).abs() < 0.04, "ratio {ratio}");
    }

    #[test]
    fn test_same_seed_same_entities() {
        let mut a = Pcg32::seed_from_u64(9);
        let mut b = Pcg32::seed_from_u64(9);
        for i in 0..50 {
            assert_eq!(
                roll_entity(&mut a, i, Theme::Bkk, 6),
                roll_entity(&mut b, i, Theme::Bkk, 6)
            );
        }
    }
}
