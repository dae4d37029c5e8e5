//! Repair stations: passive healing of nearby structures and the objective

use super::state::World;
use crate::consts::MAX_BLOCK_HEALTH;
use crate::distance;

/// Healing reach from a station's center
pub const REPAIR_RADIUS: f32 = 90.0;
/// Block health restored per tick
pub const REPAIR_BLOCK_RATE: f32 = 0.15;
/// Objective hp restored per tick
pub const REPAIR_OBJECTIVE_RATE: f32 = 0.06;

/// One tick of healing from every repair station
pub fn update(world: &mut World) {
    let stations: Vec<(usize, glam::Vec2)> = world
        .blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.repair_station)
        .map(|(i, b)| (i, b.center()))
        .collect();

    for (station, center) in stations {
        for (i, block) in world.blocks.iter_mut().enumerate() {
            if i == station || block.is_wall() {
                continue;
            }
            if block.health > 0.0
                && block.health < MAX_BLOCK_HEALTH
                && distance(center, block.center()) < REPAIR_RADIUS
            {
                block.health = (block.health + REPAIR_BLOCK_RATE).min(MAX_BLOCK_HEALTH);
            }
        }

        if distance(center, world.objective.pos) < REPAIR_RADIUS {
            world.objective.heal(REPAIR_OBJECTIVE_RATE);
        }
    }
}
