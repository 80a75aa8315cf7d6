//! Demo driver
//!
//! Picks a command from the current state the way a cautious player would:
//! snack when hurt, step out of a lane with an obstacle coming, boost when
//! every reachable lane is blocked, and drift toward collectibles otherwise.
//! Reads state only; the caller feeds the command back through the queue.

use super::command::{Command, LaneDirection};
use super::state::SimulationState;
use crate::consts::{HIT_BAND_BELOW, LANE_COUNT, MAX_LIVES};

/// How far up the road obstacles are considered a threat (pixels)
pub const THREAT_LOOKAHEAD: f32 = 260.0;
/// How far up the road collectibles are worth chasing (pixels)
pub const CHASE_LOOKAHEAD: f32 = 420.0;

/// Suggest the next command, or `None` to keep going straight
pub fn suggest(state: &SimulationState) -> Option<Command> {
    let player = &state.player;

    if player.tokens > 0 && state.lives < MAX_LIVES {
        return Some(Command::UseSnack);
    }

    if lane_threatened(state, player.lane) {
        let escape = [LaneDirection::Left, LaneDirection::Right]
            .into_iter()
            .find(|&dir| neighbor(player.lane, dir).is_some_and(|lane| !lane_threatened(state, lane)));
        return match escape {
            Some(dir) => Some(Command::ShiftLane(dir)),
            None if !player.is_invulnerable() => Some(Command::Boost),
            None => None,
        };
    }

    // Nothing incoming: go after the nearest collectible
    let target = state
        .entities
        .iter()
        .filter(|e| e.is_good())
        .filter(|e| {
            let ahead = player.y - e.y;
            ahead > 0.0 && ahead < CHASE_LOOKAHEAD
        })
        .max_by(|a, b| a.y.total_cmp(&b.y))?;

    if target.lane == player.lane {
        return None;
    }
    let dir = if target.lane < player.lane {
        LaneDirection::Left
    } else {
        LaneDirection::Right
    };
    let next = neighbor(player.lane, dir)?;
    (!lane_threatened(state, next)).then_some(Command::ShiftLane(dir))
}

fn neighbor(lane: usize, dir: LaneDirection) -> Option<usize> {
    let next = lane as isize + dir.delta();
    (0..LANE_COUNT as isize)
        .contains(&next)
        .then_some(next as usize)
}

/// An obstacle in this lane is about to reach the player row
fn lane_threatened(state: &SimulationState, lane: usize) -> bool {
    let player_y = state.player.y;
    state.entities.iter().any(|e| {
        !e.is_good()
            && e.lane == lane
            && e.y < player_y + HIT_BAND_BELOW
            && player_y - e.y < THREAT_LOOKAHEAD
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{LevelSequencer, default_stops};
    use crate::sim::state::{Category, Entity, Kind};

    fn state() -> SimulationState {
        SimulationState::new(LevelSequencer::new(default_stops()).unwrap(), 3)
    }

    fn add(state: &mut SimulationState, lane: usize, ahead: f32, category: Category) {
        let id = state.next_entity_id();
        let kind = match category {
            Category::Good => Kind::Palm,
            Category::Bad => Kind::Cone,
        };
        state.entities.push(Entity {
            id,
            lane,
            y: state.player.y - ahead,
            category,
            kind,
            speed: 500.0,
            size: 60.0,
        });
    }

    #[test]
    fn test_clear_road_goes_straight() {
        assert_eq!(suggest(&state()), None);
    }

    #[test]
    fn test_snacks_when_hurt() {
        let mut s = state();
        s.lives = 2;
        s.player.tokens = 1;
        assert_eq!(suggest(&s), Some(Command::UseSnack));

        s.lives = MAX_LIVES;
        assert_eq!(suggest(&s), None);
    }

    #[test]
    fn test_dodges_incoming_obstacle() {
        let mut s = state();
        add(&mut s, 1, 100.0, Category::Bad);
        add(&mut s, 0, 120.0, Category::Bad);
        assert_eq!(
            suggest(&s),
            Some(Command::ShiftLane(LaneDirection::Right))
        );
    }

    #[test]
    fn test_boosts_when_cornered() {
        let mut s = state();
        for lane in 0..LANE_COUNT {
            add(&mut s, lane, 80.0, Category::Bad);
        }
        assert_eq!(suggest(&s), Some(Command::Boost));

        s.player.boost();
        assert_eq!(suggest(&s), None);
    }

    #[test]
    fn test_ignores_distant_obstacles() {
        let mut s = state();
        add(&mut s, 1, THREAT_LOOKAHEAD + 50.0, Category::Bad);
        assert_eq!(suggest(&s), None);
    }

    #[test]
    fn test_chases_collectible_through_clear_lane() {
        let mut s = state();
        s.player.lane = 0;
        add(&mut s, 2, 200.0, Category::Good);
        assert_eq!(
            suggest(&s),
            Some(Command::ShiftLane(LaneDirection::Right))
        );

        // Blocked path: stay put
        add(&mut s, 1, 150.0, Category::Bad);
        assert_eq!(suggest(&s), None);
    }
}
