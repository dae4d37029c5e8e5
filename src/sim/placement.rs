//! Placement catalog
//!
//! Every tool maps to one fixed-shape insertion. Placement never fails:
//! overlapping or out-of-bounds structures are accepted and simply have no
//! effect where nothing reaches them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Block, Bomb, Conveyor, Trap, Turret, World};
use crate::consts::MAX_BLOCK_HEALTH;
use crate::{Rect, distance};

/// Turret fire rate (shots per second)
pub const TURRET_RATE: f32 = 0.25;
/// Trap trigger radius
pub const TRAP_RADIUS: f32 = 28.0;
/// Bomb fuse (ticks)
pub const BOMB_FUSE_TICKS: u32 = 60;

/// Instant welder: block search radius and heal amounts
pub const WELD_RANGE: f32 = 80.0;
pub const WELD_BLOCK_HEAL: f32 = 35.0;
pub const WELD_OBJECTIVE_HEAL: f32 = 20.0;
/// Extra reach beyond the objective radius for the instant welder
pub const WELD_OBJECTIVE_REACH: f32 = 40.0;

/// Placeable kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    Builder,
    Barrier,
    Conveyor,
    Laser,
    Shock,
    Bomb,
    Welder,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Builder,
        Tool::Barrier,
        Tool::Conveyor,
        Tool::Laser,
        Tool::Shock,
        Tool::Bomb,
        Tool::Welder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Builder => "builder",
            Tool::Barrier => "barrier",
            Tool::Conveyor => "conveyor",
            Tool::Laser => "laser",
            Tool::Shock => "shock",
            Tool::Bomb => "bomb",
            Tool::Welder => "welder",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "builder" => Some(Tool::Builder),
            "barrier" => Some(Tool::Barrier),
            "conveyor" => Some(Tool::Conveyor),
            "laser" => Some(Tool::Laser),
            "shock" => Some(Tool::Shock),
            "bomb" => Some(Tool::Bomb),
            "welder" => Some(Tool::Welder),
            _ => None,
        }
    }
}

/// Insert the structure or defense for `tool` centered on `pos`
pub fn place(world: &mut World, tool: Tool, pos: Vec2) {
    match tool {
        Tool::Builder => world
            .blocks
            .push(Block::new(Rect::centered(pos, 60.0, 36.0), 120.0)),
        Tool::Barrier => world
            .blocks
            .push(Block::new(Rect::centered(pos, 80.0, 20.0), 180.0)),
        Tool::Conveyor => world.conveyors.push(Conveyor {
            rect: Rect::centered(pos, 120.0, 24.0),
            dir: 1,
        }),
        Tool::Laser => world.turrets.push(Turret {
            pos,
            rate: TURRET_RATE,
            cool: 0.0,
        }),
        Tool::Shock => world.traps.push(Trap {
            pos,
            radius: TRAP_RADIUS,
            cooldown: 0,
        }),
        Tool::Bomb => world.bombs.push(Bomb {
            pos,
            armed: BOMB_FUSE_TICKS,
        }),
        Tool::Welder => world
            .blocks
            .push(Block::repair_station(Rect::centered(pos, 32.0, 32.0), 160.0)),
    }
}

/// String-keyed placement; unknown kinds are ignored
pub fn place_by_name(world: &mut World, kind: &str, pos: Vec2) {
    match Tool::from_str(kind) {
        Some(tool) => place(world, tool, pos),
        None => log::warn!("Ignoring placement of unknown kind {:?}", kind),
    }
}

/// Instant welder use: patch the nearest block and top up the objective
pub fn weld(world: &mut World, pos: Vec2) {
    if let Some(idx) = world.nearest_block(pos, WELD_RANGE) {
        let block = &mut world.blocks[idx];
        if !block.is_wall() {
            block.health = (block.health + WELD_BLOCK_HEAL).min(MAX_BLOCK_HEALTH);
        }
    }

    let objective = &mut world.objective;
    if distance(pos, objective.pos) < objective.radius + WELD_OBJECTIVE_REACH {
        objective.heal(WELD_OBJECTIVE_HEAL);
    }
}

/// Remove everything the player built plus all entities; walls and the objective stay
pub fn clear_player_structures(world: &mut World) {
    world.blocks.retain(|b| b.is_wall());
    world.turrets.clear();
    world.traps.clear();
    world.bombs.clear();
    world.conveyors.clear();
    world.entities.clear();
}

/// Move the topmost player block under `from` so its top-left lands at
/// `to_top_left`. Walls stay put. Returns whether a block moved.
pub fn move_block(world: &mut World, from: Vec2, to_top_left: Vec2) -> bool {
    let Some(idx) = world.block_at(from) else {
        return false;
    };
    let block = &mut world.blocks[idx];
    if block.is_wall() {
        return false;
    }
    block.rect.x = to_top_left.x;
    block.rect.y = to_top_left.y;
    true
}

/// Housekeeping: drop near-zero-area blocks. Returns how many were removed.
pub fn sweep_degenerate_blocks(world: &mut World) -> usize {
    let before = world.blocks.len();
    world.blocks.retain(|b| !b.is_degenerate());
    before - world.blocks.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_world() -> World {
        let mut world = World::new(960.0, 640.0, 7);
        world.blocks.clear();
        world
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_str(tool.as_str()), Some(tool));
        }
        assert_eq!(Tool::from_str("LASER"), Some(Tool::Laser));
        assert_eq!(Tool::from_str("select"), None);
    }

    #[test]
    fn test_move_block_takes_topmost() {
        let mut world = empty_world();
        place(&mut world, Tool::Builder, Vec2::new(100.0, 100.0));
        place(&mut world, Tool::Barrier, Vec2::new(110.0, 100.0));

        assert!(move_block(&mut world, Vec2::new(105.0, 100.0), Vec2::new(400.0, 300.0)));
        assert_eq!(world.blocks[0].rect, Rect::new(70.0, 82.0, 60.0, 36.0));
        assert_eq!(world.blocks[1].rect, Rect::new(400.0, 300.0, 80.0, 20.0));
        assert_eq!(world.blocks[1].health, 180.0);
    }

    #[test]
    fn test_move_block_on_empty_space_or_wall() {
        let mut world = World::new(960.0, 640.0, 7);
        let before = world.blocks.clone();
        assert!(!move_block(&mut world, Vec2::new(480.0, 100.0), Vec2::new(0.0, 0.0)));
        // Left wall
        assert!(!move_block(&mut world, Vec2::new(2.0, 300.0), Vec2::new(200.0, 200.0)));
        assert_eq!(world.blocks, before);
    }

    #[test]
    fn test_builder_and_barrier_offsets() {
        let mut world = empty_world();
        place(&mut world, Tool::Builder, Vec2::new(100.0, 100.0));
        place(&mut world, Tool::Barrier, Vec2::new(200.0, 200.0));
        assert_eq!(world.blocks[0].rect, Rect::new(70.0, 82.0, 60.0, 36.0));
        assert_eq!(world.blocks[0].health, 120.0);
        assert_eq!(world.blocks[1].rect, Rect::new(160.0, 190.0, 80.0, 20.0));
        assert_eq!(world.blocks[1].health, 180.0);
    }

    #[test]
    fn test_defense_placement() {
        let mut world = empty_world();
        let p = Vec2::new(300.0, 300.0);
        place(&mut world, Tool::Laser, p);
        place(&mut world, Tool::Shock, p);
        place(&mut world, Tool::Bomb, p);
        place(&mut world, Tool::Conveyor, p);
        assert_eq!(world.turrets[0], Turret { pos: p, rate: 0.25, cool: 0.0 });
        assert_eq!(world.traps[0], Trap { pos: p, radius: 28.0, cooldown: 0 });
        assert_eq!(world.bombs[0], Bomb { pos: p, armed: 60 });
        assert_eq!(world.conveyors[0].rect, Rect::new(240.0, 288.0, 120.0, 24.0));
        assert_eq!(world.conveyors[0].dir, 1);
    }

    #[test]
    fn test_welder_places_repair_station() {
        let mut world = empty_world();
        place(&mut world, Tool::Welder, Vec2::new(50.0, 50.0));
        let station = &world.blocks[0];
        assert!(station.repair_station);
        assert_eq!(station.health, 160.0);
        assert_eq!(station.rect, Rect::new(34.0, 34.0, 32.0, 32.0));
    }

    #[test]
    fn test_unknown_kind_is_noop() {
        let mut world = empty_world();
        place_by_name(&mut world, "catapult", Vec2::new(1.0, 1.0));
        assert!(world.blocks.is_empty());
        assert!(world.turrets.is_empty());
    }

    #[test]
    fn test_weld_heals_nearest_block_and_objective() {
        let mut world = empty_world();
        world.blocks.push(Block::new(Rect::centered(Vec2::new(100.0, 100.0), 20.0, 20.0), 180.0));
        weld(&mut world, Vec2::new(110.0, 100.0));
        assert_eq!(world.blocks[0].health, 200.0);

        world.objective.hp = 50.0;
        let near = world.objective.pos + Vec2::new(60.0, 0.0);
        weld(&mut world, near);
        assert_eq!(world.objective.hp, 70.0);

        world.objective.hp = 95.0;
        weld(&mut world, near);
        assert_eq!(world.objective.hp, 100.0);
    }

    #[test]
    fn test_weld_skips_walls() {
        let mut world = empty_world();
        world.blocks.push(Block::wall(Rect::centered(Vec2::new(100.0, 100.0), 20.0, 20.0)));
        weld(&mut world, Vec2::new(100.0, 100.0));
        assert!(world.blocks[0].is_wall());
    }

    #[test]
    fn test_clear_keeps_walls_and_objective() {
        let mut world = World::new(960.0, 640.0, 7);
        place(&mut world, Tool::Laser, Vec2::new(1.0, 1.0));
        place(&mut world, Tool::Welder, Vec2::new(1.0, 1.0));
        clear_player_structures(&mut world);
        assert_eq!(world.blocks.len(), 4);
        assert!(world.blocks.iter().all(|b| b.is_wall()));
        assert!(world.turrets.is_empty());
        assert_eq!(world.objective.hp, 100.0);
    }

    #[test]
    fn test_sweep_degenerate_blocks() {
        let mut world = empty_world();
        world.blocks.push(Block::new(Rect::new(0.0, 0.0, 4.0, 50.0), 50.0));
        world.blocks.push(Block::new(Rect::new(0.0, 0.0, 50.0, 50.0), 50.0));
        assert_eq!(sweep_degenerate_blocks(&mut world), 1);
        assert_eq!(world.blocks.len(), 1);
    }
}
