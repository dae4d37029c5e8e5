//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Fixed timestep only
//! - Seeded RNG owned by the world
//! - Stable iteration order (insertion order, reverse scans for removal)

pub mod defense;
pub mod maintenance;
pub mod placement;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;

pub use placement::{
    Tool, clear_player_structures, move_block, place, place_by_name, sweep_degenerate_blocks, weld,
};
pub use state::{Block, Bomb, Conveyor, Entity, GameEvent, Objective, Trap, Turret, World};
pub use tick::{TickOutcome, tick};
