//! Per-frame simulation tick
//!
//! Core game loop that advances a running trip by one frame delta.

use super::collision::{circles_overlap, in_hit_band};
use super::command::Command;
use super::event::{GameEvent, SnackOutcome};
use super::level::StopAdvance;
use super::spawn::roll_entity;
use super::state::{Entity, Kind, SimulationState};
use crate::consts::*;

/// What the state machine should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep running
    Continue,
    /// Lives ran out mid-tick
    GameOver,
    /// Last stop completed
    Victory,
}

/// Apply a gameplay command to a running trip
pub fn apply_player_command(state: &mut SimulationState, command: Command) {
    match command {
        Command::ShiftLane(direction) => {
            if state.player.shift_lane(direction) {
                state.events.push(GameEvent::LaneChanged {
                    lane: state.player.lane,
                });
            }
        }
        Command::Boost => {
            state.player.boost();
            state.events.push(GameEvent::BoostActivated);
        }
        Command::UseSnack => {
            let outcome = use_snack(state);
            state.events.push(GameEvent::SnackUsed { outcome });
        }
        Command::Start | Command::Restart | Command::ToggleMute => {
            log::debug!("Session command {command:?} ignored by simulation");
        }
    }
}

fn use_snack(state: &mut SimulationState) -> SnackOutcome {
    if state.player.tokens == 0 {
        return SnackOutcome::NoTokens;
    }
    state.player.tokens -= 1;
    if state.lives < MAX_LIVES {
        state.lives += 1;
        SnackOutcome::ExtraLife
    } else {
        SnackOutcome::Wasted
    }
}

/// Advance a running trip by `dt` seconds
pub fn tick(state: &mut SimulationState, dt: f32) -> TickOutcome {
    state.time += dt;
    state.level.advance_time(dt);
    state.player.decay_invulnerability(dt);
    state.player.ease_toward_lane(dt);

    let stop_index = state.level.index();

    // Spawn
    if state.spawner.tick(dt, stop_index) {
        let id = state.next_entity_id();
        let theme = state.level.current().theme;
        let entity = roll_entity(&mut state.rng, id, theme, stop_index);
        log::debug!(
            "Spawned {} #{} in lane {} at {:.0}px/s",
            entity.kind.label(),
            entity.id,
            entity.lane,
            entity.speed
        );
        state.entities.push(entity);
    }

    // Move, collide, cull
    if !move_entities(state, dt) {
        let score = state.display_score();
        log::info!("Game over at stop {} with score {}", stop_index + 1, score);
        state.events.push(GameEvent::GameOver { score });
        return TickOutcome::GameOver;
    }

    // Survival reward grows with progress
    state.award(
        f64::from(dt) * (PASSIVE_SCORE_BASE + PASSIVE_SCORE_PER_STOP * stop_index as f64),
    );

    if state.level.stop_complete() {
        let final_stop = state.level.is_last();
        state.events.push(GameEvent::LevelComplete {
            index: stop_index,
            final_stop,
        });
        match state.level.advance() {
            StopAdvance::Next(next) => state.begin_stop(next),
            StopAdvance::Finished => {
                log::info!("Trip complete with score {}", state.display_score());
                return TickOutcome::Victory;
            }
        }
    }

    TickOutcome::Continue
}

/// Move every entity and resolve hits in spawn order. Returns false as soon as
/// the player runs out of lives; later entities are left untouched.
fn move_entities(state: &mut SimulationState, dt: f32) -> bool {
    let player_center = state.player.hit_center();

    let mut i = 0;
    while i < state.entities.len() {
        let entity = {
            let e = &mut state.entities[i];
            e.y += e.speed * dt;
            *e
        };

        if in_hit_band(entity.y, player_center.y)
            && circles_overlap(
                player_center,
                PLAYER_RADIUS,
                entity.center(),
                entity.hit_radius(),
            )
        {
            state.entities.remove(i);
            if !resolve_hit(state, &entity) {
                return false;
            }
            continue;
        }

        if entity.y > DESPAWN_Y {
            state.entities.remove(i);
            if entity.is_good() {
                state.penalize(PENALTY_MISSED_GOOD);
            }
            continue;
        }

        i += 1;
    }

    true
}

/// Apply the effect of touching an entity (already removed from the road).
/// Returns false if the hit cost the last life.
fn resolve_hit(state: &mut SimulationState, entity: &Entity) -> bool {
    if entity.is_good() {
        let points = if entity.kind == Kind::Snack {
            state.player.tokens += 1;
            SCORE_TOKEN
        } else {
            SCORE_SOUVENIR
        };
        state.award(points);
        state.events.push(GameEvent::CollectibleHit {
            kind: entity.kind,
            lane: entity.lane,
            y: entity.y,
            points: points as u32,
        });
        return true;
    }

    if state.player.is_invulnerable() {
        state.award(SCORE_SMASH);
        state.events.push(GameEvent::ObstacleSmashed {
            kind: entity.kind,
            lane: entity.lane,
            y: entity.y,
        });
        return true;
    }

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::ObstacleHit {
        kind: entity.kind,
        lane: entity.lane,
        y: entity.y,
        lives_left: state.lives,
    });
    state.lives > 0
}
