//! Underwell Pit - dig-and-defend survival simulation
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (world state, placement, AI, defenses)
//! - `controller`: Run lifecycle and frame-to-tick stepping
//! - `highscores`: Best survival time record
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `settings`: Arena and stepping configuration

pub mod controller;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use controller::{RunController, RunPhase, RunSummary, Snapshot};
pub use highscores::BestTime;
pub use settings::Settings;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame; enough to cover a full `MAX_FRAME_DT`
    pub const MAX_SUBSTEPS: u32 = 15;
    /// Largest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Default arena dimensions
    pub const DEFAULT_ARENA_WIDTH: f32 = 960.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 640.0;

    /// Entities stay this far inside the side and bottom edges
    pub const ARENA_MARGIN: f32 = 10.0;
    /// Entities never rise above this line (top wall)
    pub const ARENA_CEILING: f32 = 40.0;

    /// Health value marking an indestructible wall
    pub const WALL_HEALTH: f32 = 999.0;
    /// Health cap for repaired structures
    pub const MAX_BLOCK_HEALTH: f32 = 200.0;
    /// Blocks with either side at or below this are swept by housekeeping
    pub const DEGENERATE_BLOCK_SIZE: f32 = 4.0;
    /// Housekeeping sweep period (seconds of frame time)
    pub const SWEEP_INTERVAL: f32 = 3.0;
}

/// Distance between two arena points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation from `a` to `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sign of `v` as -1, 0 or 1 (unlike `f32::signum`, zero maps to zero)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Axis-aligned rectangle in arena space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `w`×`h` centered on `center`
    pub fn centered(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Point containment, edges inclusive
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert!((lerp(2.0, 4.0, 0.5) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_contains_inclusive_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(40.0, 60.0)));
        assert!(!r.contains(Vec2::new(40.1, 60.0)));
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_substeps_cover_max_frame() {
        use consts::*;
        assert!(MAX_SUBSTEPS as f32 * SIM_DT >= MAX_FRAME_DT - 1e-6);
    }

    #[test]
    fn test_rect_centered() {
        let r = Rect::centered(Vec2::new(100.0, 50.0), 60.0, 36.0);
        assert_eq!(r, Rect::new(70.0, 32.0, 60.0, 36.0));
    }
}
