//! World state and core simulation types
//!
//! The `World` owns every collection the simulation touches. Nothing holds a
//! reference into another collection: all interaction is by position query
//! each tick, so removals mid-tick never leave dangling handles.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{Rect, distance};

/// Starting hit points for a hostile entity
pub const ENTITY_START_HP: f32 = 20.0;

/// Objective defaults
pub const OBJECTIVE_RADIUS: f32 = 34.0;
pub const OBJECTIVE_MAX_HP: f32 = 100.0;

/// A rectangular terrain block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    /// Remaining health; `WALL_HEALTH` marks an indestructible wall
    pub health: f32,
    /// Passively heals nearby structures and the objective
    #[serde(default)]
    pub repair_station: bool,
}

impl Block {
    pub fn new(rect: Rect, health: f32) -> Self {
        Self {
            rect,
            health,
            repair_station: false,
        }
    }

    pub fn wall(rect: Rect) -> Self {
        Self::new(rect, WALL_HEALTH)
    }

    pub fn repair_station(rect: Rect, health: f32) -> Self {
        Self {
            rect,
            health,
            repair_station: true,
        }
    }

    /// Walls never take damage and are never removed
    #[inline]
    pub fn is_wall(&self) -> bool {
        self.health == WALL_HEALTH
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Near-zero-area blocks are collected by housekeeping
    pub fn is_degenerate(&self) -> bool {
        self.rect.w <= DEGENERATE_BLOCK_SIZE || self.rect.h <= DEGENERATE_BLOCK_SIZE
    }

    /// Subtract health unless indestructible. Returns true if the block is destroyed.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.is_wall() {
            return false;
        }
        self.health -= amount;
        self.health <= 0.0
    }
}

/// Hitscan turret
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turret {
    pub pos: Vec2,
    /// Shots per second
    pub rate: f32,
    /// Seconds until the next shot is allowed
    pub cool: f32,
}

/// Stun trap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub pos: Vec2,
    /// Trigger radius
    pub radius: f32,
    /// Ticks until the trap can trigger again
    pub cooldown: u32,
}

/// Timed bomb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    /// Ticks until detonation
    pub armed: u32,
}

/// Conveyor strip (placeable, no simulation effect yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conveyor {
    pub rect: Rect,
    pub dir: i8,
}

/// A hostile digger heading for the objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec2,
    pub vel: Vec2,
    pub hp: f32,
    /// Ticks of stun remaining (AI suspended, velocity zero)
    pub stunned: u32,
    /// Ticks spent blocked by a destructible block
    pub progress: u32,
}

impl Entity {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            hp: ENTITY_START_HP,
            stunned: 0,
            progress: 0,
        }
    }
}

/// The core the player defends; the run ends when its hp hits zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: f32,
    pub max: f32,
}

impl Objective {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: OBJECTIVE_RADIUS,
            hp: OBJECTIVE_MAX_HP,
            max: OBJECTIVE_MAX_HP,
        }
    }

    /// Heal, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max);
    }

    pub fn damage(&mut self, amount: f32) {
        self.hp -= amount;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Gameplay events emitted during a tick (audio/visual feedback only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitySpawned { pos: Vec2 },
    TurretFired { from: Vec2, to: Vec2 },
    TrapTriggered { pos: Vec2, stunned: u32 },
    BombDetonated { pos: Vec2 },
    BlockDestroyed { center: Vec2 },
    EntityKilled { pos: Vec2 },
    ObjectiveDestroyed { survived: f32 },
}

/// Complete mutable simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub blocks: Vec<Block>,
    pub turrets: Vec<Turret>,
    pub traps: Vec<Trap>,
    pub bombs: Vec<Bomb>,
    pub conveyors: Vec<Conveyor>,
    pub entities: Vec<Entity>,
    pub objective: Objective,
    /// Elapsed run seconds
    pub time: f32,
    /// Spawner and elapsed time only advance while set
    pub running: bool,
    /// Seconds until the next spawn
    pub spawn_timer: f32,
    /// Events from the most recent ticks, drained by the caller
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl World {
    /// Build the starting level for an arena of the given size
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let (w, h) = (width, height);
        let cx = w / 2.0;
        let cy = h / 2.0 + 30.0;

        let blocks = vec![
            // ground
            Block::wall(Rect::new(0.0, h - 120.0, w, 120.0)),
            // side tunnels
            Block::wall(Rect::new(0.0, 0.0, 60.0, h - 180.0)),
            Block::wall(Rect::new(w - 60.0, 0.0, 60.0, h - 180.0)),
            // top wall
            Block::wall(Rect::new(0.0, 0.0, w, ARENA_CEILING)),
            // central platform and ledges
            Block::new(Rect::new(cx - 160.0, cy - 60.0, 320.0, 120.0), 200.0),
            Block::new(Rect::new(cx - 220.0, cy + 40.0, 60.0, 40.0), 100.0),
            Block::new(Rect::new(cx + 160.0, cy + 40.0, 60.0, 40.0), 100.0),
        ];

        Self {
            width,
            height,
            blocks,
            turrets: Vec::new(),
            traps: Vec::new(),
            bombs: Vec::new(),
            conveyors: Vec::new(),
            entities: Vec::new(),
            objective: Objective::new(Vec2::new(cx, cy - 10.0)),
            time: 0.0,
            running: false,
            spawn_timer: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Topmost block containing `p` (last placed wins)
    pub fn block_at(&self, p: Vec2) -> Option<usize> {
        self.blocks.iter().rposition(|b| b.rect.contains(p))
    }

    /// Block whose center is nearest to `p`, strictly within `radius`
    pub fn nearest_block(&self, p: Vec2, radius: f32) -> Option<usize> {
        let mut best = None;
        let mut best_dist = f32::MAX;
        for (i, block) in self.blocks.iter().enumerate() {
            let d = distance(p, block.center());
            if d < radius && d < best_dist {
                best_dist = d;
                best = Some(i);
            }
        }
        best
    }

    /// Remove block `index`, recording the event
    pub fn remove_block(&mut self, index: usize) {
        let block = self.blocks.remove(index);
        self.events.push(GameEvent::BlockDestroyed {
            center: block.center(),
        });
    }

    /// Keep entities inside the playable margins
    pub fn clamp_to_arena(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(ARENA_MARGIN, (self.width - ARENA_MARGIN).max(ARENA_MARGIN)),
            p.y.clamp(ARENA_CEILING, (self.height - ARENA_MARGIN).max(ARENA_CEILING)),
        )
    }
}
