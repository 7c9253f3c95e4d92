//! Trailing stop ratchet.
//!
//! **Core Rule:** the stop may tighten, never loosen (even if ATR expands).
//! For a long position that means the level only ever rises.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingStop {
    level: f64,
}

impl TrailingStop {
    /// Start the trail at the initial protective stop.
    pub fn new(initial_level: f64) -> Self {
        Self {
            level: initial_level,
        }
    }

    /// Raise the stop to `proposed` if that tightens it. Returns the new level.
    ///
    /// A NaN proposal (ATR undefined) leaves the level unchanged.
    pub fn ratchet(&mut self, proposed: f64) -> f64 {
        if proposed > self.level {
            self.level = proposed;
        }
        self.level
    }

    pub fn level(&self) -> f64 {
        self.level
    }
}
