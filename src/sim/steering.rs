//! Entity AI: seek the objective, wander, dig through blocks, siege
//!
//! Positions and velocities are in arena pixels per tick.

use glam::Vec2;
use rand::Rng;

use super::state::{ENTITY_START_HP, World};
use crate::{distance, sign};

/// Per-tick chance of a wander nudge
pub const WANDER_CHANCE: f64 = 0.01;
/// Wander nudge magnitude (uniform in ±this)
pub const WANDER_STRENGTH: f32 = 0.3;
/// Horizontal acceleration toward the objective (before speed factor)
pub const SEEK_ACCEL: f32 = 0.05;
pub const MAX_SPEED_X: f32 = 2.0;
/// Vertical drift toward the objective
pub const DRIFT_Y: f32 = 0.02;
pub const MAX_SPEED_Y: f32 = 1.2;

/// How far ahead the dig probe looks
pub const DIG_PROBE: f32 = 8.0;
/// Blocked ticks needed before a dig lands
pub const DIG_TICKS: u32 = 45;
pub const DIG_DAMAGE: f32 = 8.0;

/// Siege range beyond the objective radius
pub const SIEGE_REACH: f32 = 10.0;
/// Objective hp lost per tick per sieging entity
pub const SIEGE_DAMAGE: f32 = 0.08;

/// Speed multiplier: wounded entities move faster
pub fn speed_factor(hp: f32) -> f32 {
    0.6 + (ENTITY_START_HP - hp.max(0.0)) / ENTITY_START_HP
}

/// Full per-tick update for entity `idx`: steer, dig, move, siege
pub fn update(world: &mut World, idx: usize) {
    steer(world, idx);
    integrate(world, idx);
    siege(world, idx);
}

/// Decide velocity for this tick, including stun and digging
pub fn steer(world: &mut World, idx: usize) {
    let target = world.objective.pos;

    let probe = {
        let entity = &mut world.entities[idx];
        if entity.stunned > 0 {
            entity.stunned -= 1;
            entity.vel = Vec2::ZERO;
            return;
        }

        if world.rng.random_bool(WANDER_CHANCE) {
            entity.vel.x += world.rng.random_range(-WANDER_STRENGTH..WANDER_STRENGTH);
        }

        let to_target = target - entity.pos;
        let d = to_target.length();
        let dir = if d > 0.0 { to_target / d } else { to_target };

        let speed = speed_factor(entity.hp);
        entity.vel.x = (entity.vel.x + dir.x * SEEK_ACCEL * speed).clamp(-MAX_SPEED_X, MAX_SPEED_X);
        entity.vel.y = (dir.y * DRIFT_Y).clamp(-MAX_SPEED_Y, MAX_SPEED_Y);

        Vec2::new(entity.pos.x + sign(entity.vel.x) * DIG_PROBE, entity.pos.y)
    };

    // Walls stop nothing here; only destructible blocks are dug
    let blocking = world.block_at(probe).filter(|&b| !world.blocks[b].is_wall());

    let entity = &mut world.entities[idx];
    match blocking {
        Some(b) => {
            entity.vel.x = 0.0;
            entity.progress += 1;
            if entity.progress > DIG_TICKS {
                entity.progress = 0;
                if world.blocks[b].damage(DIG_DAMAGE) {
                    world.remove_block(b);
                }
            }
        }
        None => entity.progress = 0,
    }
}

/// Apply velocity and keep the entity inside the arena
pub fn integrate(world: &mut World, idx: usize) {
    let entity = &world.entities[idx];
    let pos = world.clamp_to_arena(entity.pos + entity.vel);
    world.entities[idx].pos = pos;
}

/// Continuous objective damage while in contact range
pub fn siege(world: &mut World, idx: usize) {
    let objective = &mut world.objective;
    if distance(world.entities[idx].pos, objective.pos) < objective.radius + SIEGE_REACH {
        objective.damage(SIEGE_DAMAGE);
    }
}
