//! Defense behavior: turrets, stun traps, timed bombs

use super::state::{GameEvent, World};
use crate::distance;

/// Turret engagement range
pub const TURRET_RANGE: f32 = 300.0;
pub const TURRET_DAMAGE: f32 = 8.0;

/// Extra trigger reach beyond the trap radius (entity body size)
pub const TRAP_REACH: f32 = 8.0;
/// Ticks an entity stays stunned
pub const TRAP_STUN_TICKS: u32 = 90;
/// Ticks before a trap can fire again
pub const TRAP_COOLDOWN_TICKS: u32 = 240;

pub const BOMB_ENTITY_RADIUS: f32 = 90.0;
pub const BOMB_ENTITY_DAMAGE: f32 = 30.0;
pub const BOMB_BLOCK_RADIUS: f32 = 120.0;
pub const BOMB_BLOCK_DAMAGE: f32 = 80.0;
pub const BOMB_OBJECTIVE_RADIUS: f32 = 120.0;
pub const BOMB_OBJECTIVE_DAMAGE: f32 = 25.0;

/// Cool down every turret by `dt`; a ready turret shoots the nearest entity in range
pub fn update_turrets(world: &mut World, dt: f32) {
    let World {
        turrets,
        entities,
        events,
        ..
    } = world;

    for turret in turrets.iter_mut() {
        turret.cool -= dt;
        if turret.cool > 0.0 {
            continue;
        }

        // Strict comparison: first found wins exact ties
        let mut best = None;
        let mut best_dist = TURRET_RANGE;
        for (i, entity) in entities.iter().enumerate() {
            let d = distance(turret.pos, entity.pos);
            if d < best_dist {
                best_dist = d;
                best = Some(i);
            }
        }

        if let Some(i) = best {
            let target = &mut entities[i];
            target.hp -= TURRET_DAMAGE;
            turret.cool = 1.0 / turret.rate;
            events.push(GameEvent::TurretFired {
                from: turret.pos,
                to: target.pos,
            });
        }
    }
}

/// Tick trap cooldowns; an armed trap stuns everything in reach, then re-arms
pub fn update_traps(world: &mut World) {
    let World {
        traps,
        entities,
        events,
        ..
    } = world;

    for trap in traps.iter_mut() {
        trap.cooldown = trap.cooldown.saturating_sub(1);
        // Gate once per tick so a single trigger covers every entity present
        if trap.cooldown > 0 {
            continue;
        }

        let reach = trap.radius + TRAP_REACH;
        let mut stunned = 0;
        for entity in entities.iter_mut() {
            if distance(trap.pos, entity.pos) < reach {
                entity.stunned = TRAP_STUN_TICKS;
                stunned += 1;
            }
        }

        if stunned > 0 {
            trap.cooldown = TRAP_COOLDOWN_TICKS;
            events.push(GameEvent::TrapTriggered {
                pos: trap.pos,
                stunned,
            });
        }
    }
}

/// Count down bomb fuses and detonate the expired ones
pub fn update_bombs(world: &mut World) {
    for i in (0..world.bombs.len()).rev() {
        let bomb = &mut world.bombs[i];
        bomb.armed = bomb.armed.saturating_sub(1);
        if bomb.armed == 0 {
            let bomb = world.bombs.remove(i);
            detonate(world, bomb.pos);
        }
    }
}

/// Blast damage to entities, blocks and the objective around `pos`
pub fn detonate(world: &mut World, pos: glam::Vec2) {
    log::debug!("Bomb detonated at ({:.0}, {:.0})", pos.x, pos.y);
    world.events.push(GameEvent::BombDetonated { pos });

    for entity in world.entities.iter_mut() {
        if distance(pos, entity.pos) < BOMB_ENTITY_RADIUS {
            entity.hp -= BOMB_ENTITY_DAMAGE;
        }
    }

    // Reverse scan so removals never skip a block; walls are exempt
    for j in (0..world.blocks.len()).rev() {
        let block = &mut world.blocks[j];
        if distance(pos, block.center()) < BOMB_BLOCK_RADIUS && block.damage(BOMB_BLOCK_DAMAGE) {
            world.remove_block(j);
        }
    }

    if distance(pos, world.objective.pos) < BOMB_OBJECTIVE_RADIUS {
        world.objective.damage(BOMB_OBJECTIVE_DAMAGE);
    }
}
