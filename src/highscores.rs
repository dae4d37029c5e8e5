//! Best survival time record
//!
//! Stored as decimal seconds with one fractional digit, read once at startup
//! and written only when a run beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Longest survival so far
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BestTime {
    pub seconds: f32,
}

impl BestTime {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "underwell_high";

    pub fn new(seconds: f32) -> Self {
        Self { seconds }
    }

    /// Parse a stored value; garbage reads as no record
    pub fn parse(s: &str) -> Option<Self> {
        let seconds: f32 = s.trim().parse().ok()?;
        if seconds.is_finite() && seconds >= 0.0 {
            Some(Self::new(seconds))
        } else {
            None
        }
    }

    /// Storage representation: one fractional digit
    pub fn format(&self) -> String {
        format_seconds(self.seconds)
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, survived: f32) -> bool {
        if survived > self.seconds {
            self.seconds = survived;
            true
        } else {
            false
        }
    }

    /// Load from the store, falling back to zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(raw) => match Self::parse(&raw) {
                Some(best) => {
                    log::info!("Loaded best time {}s", best.format());
                    best
                }
                None => {
                    log::warn!("Ignoring unreadable best time {:?}", raw);
                    Self::default()
                }
            },
            None => {
                log::info!("No best time found, starting fresh");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set(Self::STORAGE_KEY, &self.format());
        log::info!("Best time saved ({}s)", self.format());
    }
}

/// Seconds with one fractional digit, as shown on the HUD
pub fn format_seconds(seconds: f32) -> String {
    format!("{:.1}", seconds)
}
