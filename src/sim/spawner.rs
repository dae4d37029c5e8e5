//! Hostile spawning on a tightening cadence

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, GameEvent, World};

/// Base spawn interval at the start of a run (seconds)
pub const BASE_SPAWN_INTERVAL: f32 = 30.0;
/// Base interval never drops below this
pub const MIN_SPAWN_INTERVAL: f32 = 10.0;
/// Every this many seconds of run time shaves one second off the base
pub const SPAWN_RAMP_SECONDS: f32 = 20.0;
/// Distance from the left/right edge where entities appear
pub const SPAWN_EDGE_INSET: f32 = 80.0;
/// Top of the spawn band
pub const SPAWN_TOP: f32 = 60.0;

/// Base interval before jitter for a given elapsed run time
pub fn base_interval(time: f32) -> f32 {
    (BASE_SPAWN_INTERVAL - (time / SPAWN_RAMP_SECONDS).floor()).max(MIN_SPAWN_INTERVAL)
}

/// Next spawn delay: base interval scaled by a uniform factor in [0.7, 1.3)
pub fn next_interval<R: Rng>(time: f32, rng: &mut R) -> f32 {
    base_interval(time) * rng.random_range(0.7..1.3)
}

/// Spawn one entity at a random side edge in the upper third of the arena
pub fn spawn_entity(world: &mut World) {
    let left = world.rng.random_bool(0.5);
    let x = if left {
        SPAWN_EDGE_INSET
    } else {
        world.width - SPAWN_EDGE_INSET
    };
    let y = SPAWN_TOP + world.rng.random::<f32>() * (world.height / 3.0);
    let pos = Vec2::new(x, y);

    log::debug!("Spawned entity at ({:.0}, {:.0}), t={:.1}s", pos.x, pos.y, world.time);
    world.entities.push(Entity::new(pos));
    world.events.push(GameEvent::EntitySpawned { pos });
}

/// Count down the spawn timer by `dt`; spawn and re-arm when it expires
pub fn update(world: &mut World, dt: f32) {
    world.spawn_timer -= dt;
    if world.spawn_timer <= 0.0 {
        world.spawn_timer = next_interval(world.time, &mut world.rng);
        spawn_entity(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_interval_at_start() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let i = next_interval(0.0, &mut rng);
            assert!(i >= 30.0 * 0.7 && i <= 30.0 * 1.3, "interval {i}");
        }
    }

    #[test]
    fn test_interval_floor_reached() {
        let mut rng = Pcg32::seed_from_u64(4);
        assert_eq!(base_interval(600.0), 10.0);
        for _ in 0..500 {
            let i = next_interval(600.0, &mut rng);
            assert!(i >= 10.0 * 0.7 && i <= 10.0 * 1.3, "interval {i}");
        }
    }

    #[test]
    fn test_base_interval_ramp() {
        assert_eq!(base_interval(19.9), 30.0);
        assert_eq!(base_interval(20.0), 29.0);
        assert_eq!(base_interval(399.0), 11.0);
        assert_eq!(base_interval(10_000.0), 10.0);
    }

    #[test]
    fn test_spawn_position_on_edges() {
        let mut world = World::new(960.0, 600.0, 11);
        for _ in 0..100 {
            spawn_entity(&mut world);
        }
        for e in &world.entities {
            assert!(e.pos.x == 80.0 || e.pos.x == 880.0);
            assert!(e.pos.y >= 60.0 && e.pos.y <= 260.0);
            assert_eq!(e.hp, 20.0);
        }
        assert!(world.entities.iter().any(|e| e.pos.x == 80.0));
        assert!(world.entities.iter().any(|e| e.pos.x == 880.0));
    }

    #[test]
    fn test_first_update_spawns_immediately() {
        let mut world = World::new(960.0, 640.0, 5);
        update(&mut world, 1.0 / 60.0);
        assert_eq!(world.entities.len(), 1);
        assert!(world.spawn_timer > 20.0);
    }
}
