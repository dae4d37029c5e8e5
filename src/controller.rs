//! Run controller
//!
//! Owns the world for one run and drives it from frame deltas: a fixed-step
//! accumulator turns irregular frames into whole 60 Hz ticks, capped per
//! frame so a stall never turns into a catch-up spiral.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::highscores::BestTime;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{
    Block, Bomb, Conveyor, Entity, GameEvent, Objective, TickOutcome, Tool, Trap, Turret, World,
    placement, tick,
};

/// Events kept for a caller that never drains them
pub const MAX_PENDING_EVENTS: usize = 1024;

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunPhase {
    /// Fresh world, clock stopped
    Idle,
    /// Ticking
    Running,
    /// Ticks suspended, world intact
    Paused,
    /// Objective destroyed
    Ended,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// Elapsed run seconds at the loss
    pub survived: f32,
    /// Best time after recording this run
    pub best: f32,
    pub new_record: bool,
}

/// Read-only view of the world for rendering and HUD
#[derive(Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub phase: RunPhase,
    pub running: bool,
    pub ended: bool,
    pub time: f32,
    pub best: f32,
    pub objective: &'a Objective,
    pub blocks: &'a [Block],
    pub turrets: &'a [Turret],
    pub traps: &'a [Trap],
    pub bombs: &'a [Bomb],
    pub conveyors: &'a [Conveyor],
    pub entities: &'a [Entity],
}

/// A block held by the pointer: where it was last seen and the grip offset
#[derive(Debug, Clone, Copy, PartialEq)]
struct Grab {
    pointer: Vec2,
    offset: Vec2,
}

/// Start/pause/resume/reset lifecycle around the simulation tick
pub struct RunController {
    settings: Settings,
    world: World,
    phase: RunPhase,
    accumulator: f32,
    sweep_timer: f32,
    best: BestTime,
    store: Box<dyn KeyValueStore>,
    outcome: Option<RunSummary>,
    grab: Option<Grab>,
    runs: u64,
}

impl RunController {
    /// Build an idle controller; the best time is read from `store` once here
    pub fn new(settings: Settings, store: Box<dyn KeyValueStore>) -> Self {
        let best = BestTime::load(store.as_ref());
        let world = World::new(settings.arena_width, settings.arena_height, settings.seed);
        Self {
            settings,
            world,
            phase: RunPhase::Idle,
            accumulator: 0.0,
            sweep_timer: 0.0,
            best,
            store,
            outcome: None,
            grab: None,
            runs: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best(&self) -> BestTime {
        self.best
    }

    /// Set once the run has ended, cleared by reset
    pub fn outcome(&self) -> Option<RunSummary> {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.phase == RunPhase::Ended
    }

    /// Idle or ended → running. An ended world is not rebuilt here; call `reset` first.
    pub fn start(&mut self) {
        match self.phase {
            RunPhase::Idle | RunPhase::Ended => {
                log::info!("Run started");
                self.set_phase(RunPhase::Running);
            }
            RunPhase::Running | RunPhase::Paused => {}
        }
    }

    pub fn pause(&mut self) {
        if self.phase == RunPhase::Running {
            log::info!("Paused at {:.1}s", self.world.time);
            self.set_phase(RunPhase::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            log::info!("Resumed");
            self.set_phase(RunPhase::Running);
        }
    }

    /// Single-key toggle: pause a running game, otherwise start or resume
    pub fn toggle(&mut self) {
        match self.phase {
            RunPhase::Running => self.pause(),
            RunPhase::Paused => self.resume(),
            RunPhase::Idle | RunPhase::Ended => self.start(),
        }
    }

    /// Any state → idle with a freshly built world. The layout is fixed; each
    /// run draws a new spawn and wander stream.
    pub fn reset(&mut self) {
        self.runs += 1;
        let seed = self.settings.seed.wrapping_add(self.runs);
        self.world = World::new(self.settings.arena_width, self.settings.arena_height, seed);
        self.phase = RunPhase::Idle;
        self.accumulator = 0.0;
        self.sweep_timer = 0.0;
        self.outcome = None;
        self.grab = None;
        log::info!("World reset");
    }

    /// Record new arena dimensions (render surface resized)
    pub fn set_arena(&mut self, width: f32, height: f32) {
        self.settings.arena_width = width;
        self.settings.arena_height = height;
        self.world.width = width;
        self.world.height = height;
    }

    pub fn place(&mut self, tool: Tool, pos: Vec2) {
        placement::place(&mut self.world, tool, pos);
    }

    /// Placement from a catalog string; unknown kinds are ignored
    pub fn place_by_name(&mut self, kind: &str, pos: Vec2) {
        placement::place_by_name(&mut self.world, kind, pos);
    }

    /// Instant welder use at `pos`
    pub fn weld(&mut self, pos: Vec2) {
        placement::weld(&mut self.world, pos);
    }

    /// Pick up the topmost player block under `pointer`. Returns whether one was grabbed.
    pub fn grab(&mut self, pointer: Vec2) -> bool {
        self.grab = self
            .world
            .block_at(pointer)
            .filter(|&b| !self.world.blocks[b].is_wall())
            .map(|b| Grab {
                pointer,
                offset: pointer - self.world.blocks[b].rect.top_left(),
            });
        self.grab.is_some()
    }

    /// Move the held block so it keeps its grip offset under `pointer`
    pub fn drag(&mut self, pointer: Vec2) {
        let Some(grab) = self.grab else {
            return;
        };
        if placement::move_block(&mut self.world, grab.pointer, pointer - grab.offset) {
            self.grab = Some(Grab { pointer, ..grab });
        } else {
            // Dug out from under the pointer
            self.grab = None;
        }
    }

    pub fn release(&mut self) {
        self.grab = None;
    }

    pub fn clear_player_structures(&mut self) {
        placement::clear_player_structures(&mut self.world);
        self.grab = None;
        log::info!("Cleared player structures");
    }

    /// Advance by one rendered frame. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.settings.max_frame_dt)
        } else {
            0.0
        };

        self.housekeeping(frame_dt);

        if self.phase != RunPhase::Running {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += frame_dt;
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < self.settings.max_substeps {
            self.accumulator -= SIM_DT;
            ticks += 1;
            if tick(&mut self.world, SIM_DT) == TickOutcome::ObjectiveDestroyed {
                self.finish();
                break;
            }
        }

        // Backlog up to one clamped frame carries over; beyond that it is a stall
        if self.accumulator > self.settings.max_frame_dt {
            log::debug!("Dropping {:.3}s of catch-up", self.accumulator);
            self.accumulator %= SIM_DT;
        }

        let pending = self.world.events.len();
        if pending > MAX_PENDING_EVENTS {
            self.world.events.drain(..pending - MAX_PENDING_EVENTS);
        }

        ticks
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.events)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let w = &self.world;
        Snapshot {
            phase: self.phase,
            running: self.phase == RunPhase::Running,
            ended: self.phase == RunPhase::Ended,
            time: w.time,
            best: self.best.seconds,
            objective: &w.objective,
            blocks: &w.blocks,
            turrets: &w.turrets,
            traps: &w.traps,
            bombs: &w.bombs,
            conveyors: &w.conveyors,
            entities: &w.entities,
        }
    }

    fn set_phase(&mut self, phase: RunPhase) {
        self.phase = phase;
        self.world.running = phase == RunPhase::Running;
    }

    /// Periodic collection of degenerate blocks, on frame time
    fn housekeeping(&mut self, frame_dt: f32) {
        self.sweep_timer += frame_dt;
        if self.sweep_timer >= SWEEP_INTERVAL {
            self.sweep_timer -= SWEEP_INTERVAL;
            let removed = placement::sweep_degenerate_blocks(&mut self.world);
            if removed > 0 {
                log::debug!("Swept {} degenerate blocks", removed);
            }
        }
    }

    fn finish(&mut self) {
        self.set_phase(RunPhase::Ended);
        let survived = self.world.time;
        let new_record = self.best.record(survived);
        if new_record {
            self.best.save(self.store.as_mut());
        }
        log::info!(
            "Run ended after {:.1}s (best {:.1}s{})",
            survived,
            self.best.seconds,
            if new_record { ", new record" } else { "" }
        );
        self.outcome = Some(RunSummary {
            survived,
            best: self.best.seconds,
            new_record,
        });
    }
}
