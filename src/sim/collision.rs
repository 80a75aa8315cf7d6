//! Collision tests between the player and road entities
//!
//! Everything on the road is treated as a circle. The player and an entity
//! collide when their circles overlap AND the entity sits inside the narrow
//! vertical band around the player row.

use glam::Vec2;

use crate::consts::{HIT_BAND_ABOVE, HIT_BAND_BELOW};

/// Check whether two circles overlap (touching counts as a hit)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// Check whether an entity row is inside the hit band around the player row
#[inline]
pub fn in_hit_band(entity_y: f32, player_y: f32) -> bool {
    entity_y > player_y - HIT_BAND_ABOVE && entity_y < player_y + HIT_BAND_BELOW
}
