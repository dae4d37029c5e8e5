//! Underwell Pit entry point
//!
//! The browser build is driven through the `wasm` binding. Natively this runs
//! a headless survival run against a fixed defense layout and logs the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use underwell_pit::consts::SIM_DT;
    use underwell_pit::persistence::MemoryStore;
    use underwell_pit::sim::{GameEvent, Tool};
    use underwell_pit::{RunController, Settings};

    env_logger::init();
    log::info!("Underwell Pit (native, headless) starting...");

    let settings = Settings::default();
    let (w, h) = (settings.arena_width, settings.arena_height);
    let mut pit = RunController::new(settings, Box::new(MemoryStore::new()));

    // Flank turrets, traps at the tunnel mouths, a repair station by the core
    let core = pit.world().objective.pos;
    pit.place(Tool::Laser, Vec2::new(w * 0.3, h * 0.3));
    pit.place(Tool::Laser, Vec2::new(w * 0.7, h * 0.3));
    pit.place(Tool::Shock, Vec2::new(120.0, 150.0));
    pit.place(Tool::Shock, Vec2::new(w - 120.0, 150.0));
    pit.place(Tool::Barrier, core - Vec2::new(120.0, 90.0));
    pit.place(Tool::Barrier, core + Vec2::new(120.0, -90.0));
    pit.place(Tool::Welder, core + Vec2::new(0.0, -70.0));
    pit.start();

    // Ten simulated minutes at most
    let max_frames = (600.0 / SIM_DT) as u32;
    let mut spawned = 0;
    let mut killed = 0;
    for frame in 0..max_frames {
        pit.advance(SIM_DT);
        for event in pit.drain_events() {
            match event {
                GameEvent::EntitySpawned { .. } => spawned += 1,
                GameEvent::EntityKilled { .. } => killed += 1,
                _ => {}
            }
        }
        if frame % 3600 == 0 {
            log::info!(
                "t={:.1}s core hp={:.1} entities={}",
                pit.world().time,
                pit.world().objective.hp,
                pit.world().entities.len()
            );
        }
        if pit.is_ended() {
            break;
        }
    }

    match pit.outcome() {
        Some(summary) => println!(
            "Core destroyed after {:.1}s (best {:.1}s). Spawned {}, killed {}.",
            summary.survived, summary.best, spawned, killed
        ),
        None => println!(
            "Core held for {:.1}s with {:.1} hp left. Spawned {}, killed {}.",
            pit.world().time,
            pit.world().objective.hp,
            spawned,
            killed
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm::init, this is just to satisfy the compiler
}
