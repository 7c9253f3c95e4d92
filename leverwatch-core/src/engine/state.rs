//! Position state threaded through the signal scan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ratchet::TrailingStop;

/// Levels fixed at entry plus the live trailing stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    pub entry_date: NaiveDate,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    pub trail: TrailingStop,
}

impl OpenPosition {
    /// Open at `entry` with stop and target `stop_mult`/`target_mult` ATRs away.
    /// The trail starts at the stop.
    pub fn open(
        entry_date: NaiveDate,
        entry: f64,
        atr: f64,
        stop_mult: f64,
        target_mult: f64,
    ) -> Self {
        let stop = entry - stop_mult * atr;
        Self {
            entry_date,
            entry,
            stop,
            target: entry + target_mult * atr,
            trail: TrailingStop::new(stop),
        }
    }
}

/// FLAT / LONG. At most one position is ever open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionState {
    #[default]
    Flat,
    Long(OpenPosition),
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat)
    }

    pub fn position(&self) -> Option<&OpenPosition> {
        match self {
            Self::Flat => None,
            Self::Long(pos) => Some(pos),
        }
    }
}
