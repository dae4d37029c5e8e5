//! Fixed timestep simulation tick
//!
//! Advances the world by one step in a fixed order: spawner and clock,
//! turrets, traps, bombs, entities, repair stations, loss check.

use super::state::{GameEvent, World};
use super::{defense, maintenance, spawner, steering};

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Simulation continues
    Continue,
    /// The objective fell this tick; the run is over
    ObjectiveDestroyed,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, dt: f32) -> TickOutcome {
    if world.running {
        spawner::update(world, dt);
        world.time += dt;
    }

    defense::update_turrets(world, dt);
    defense::update_traps(world);
    defense::update_bombs(world);

    // Reverse scan: removals never shift an entity we have yet to visit
    for i in (0..world.entities.len()).rev() {
        if world.entities[i].hp <= 0.0 {
            let dead = world.entities.remove(i);
            world.events.push(GameEvent::EntityKilled { pos: dead.pos });
            continue;
        }
        steering::update(world, i);
    }

    maintenance::update(world);

    if world.objective.hp <= 0.0 {
        world.objective.hp = 0.0;
        world.running = false;
        world.events.push(GameEvent::ObjectiveDestroyed {
            survived: world.time,
        });
        log::info!("Objective destroyed after {:.1}s", world.time);
        return TickOutcome::ObjectiveDestroyed;
    }

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::placement::{Tool, place};
    use crate::sim::state::Entity;
    use glam::Vec2;

    #[test]
    fn test_time_only_advances_while_running() {
        let mut world = World::new(960.0, 640.0, 1);
        tick(&mut world, SIM_DT);
        assert_eq!(world.time, 0.0);
        assert!(world.entities.is_empty());

        world.running = true;
        tick(&mut world, SIM_DT);
        assert!((world.time - SIM_DT).abs() < 1e-6);
        assert_eq!(world.entities.len(), 1);
    }

    #[test]
    fn test_dead_entities_removed() {
        let mut world = World::new(960.0, 640.0, 1);
        let mut dead = Entity::new(Vec2::new(200.0, 100.0));
        dead.hp = 0.0;
        world.entities.push(Entity::new(Vec2::new(100.0, 100.0)));
        world.entities.push(dead);
        world.entities.push(Entity::new(Vec2::new(300.0, 100.0)));

        tick(&mut world, SIM_DT);
        assert_eq!(world.entities.len(), 2);
        assert!(world.events.contains(&GameEvent::EntityKilled {
            pos: Vec2::new(200.0, 100.0)
        }));
    }

    #[test]
    fn test_bomb_scenario() {
        let mut world = World::new(960.0, 640.0, 1);
        let p = Vec2::new(300.0, 150.0);
        place(&mut world, Tool::Bomb, p);

        // Both held in place for the whole fuse
        let mut tough = Entity::new(p + Vec2::new(40.0, 0.0));
        tough.hp = 50.0;
        tough.stunned = 1000;
        let mut weak = Entity::new(p - Vec2::new(40.0, 0.0));
        weak.stunned = 1000;
        world.entities.push(tough);
        world.entities.push(weak);

        for _ in 0..59 {
            tick(&mut world, SIM_DT);
        }
        assert_eq!(world.bombs.len(), 1);
        assert_eq!(world.entities.len(), 2);

        tick(&mut world, SIM_DT);
        assert!(world.bombs.is_empty());
        // The weak one is cleared in the same tick's entity pass
        assert_eq!(world.entities.len(), 1);
        assert_eq!(world.entities[0].hp, 20.0);
        assert!(world.events.contains(&GameEvent::BombDetonated { pos: p }));
    }

    #[test]
    fn test_loss_clamps_and_stops() {
        let mut world = World::new(960.0, 640.0, 1);
        world.running = true;
        world.objective.hp = 20.0;
        let at = world.objective.pos;
        place(&mut world, Tool::Bomb, at);
        world.bombs[0].armed = 1;

        let outcome = tick(&mut world, SIM_DT);
        assert_eq!(outcome, TickOutcome::ObjectiveDestroyed);
        assert_eq!(world.objective.hp, 0.0);
        assert!(!world.running);
    }

    #[test]
    fn test_surviving_tick_continues() {
        let mut world = World::new(960.0, 640.0, 1);
        world.running = true;
        assert_eq!(tick(&mut world, SIM_DT), TickOutcome::Continue);
    }
}
