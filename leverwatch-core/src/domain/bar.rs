//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Daily OHLC bar for one instrument.
///
/// Volume is carried through from the input files but no calculation uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume: 0,
        }
    }

    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// Explain why the bar cannot be fed to the engine, if it can't.
    pub fn defect(&self) -> Option<&'static str> {
        if self.is_void() {
            Some("non-finite price")
        } else if self.high < self.low {
            Some("high below low")
        } else if self.close <= 0.0 {
            Some("non-positive close")
        } else if self.close > self.high || self.close < self.low {
            Some("close outside high/low range")
        } else {
            None
        }
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Fail fast on an unusable series: empty, out of order, duplicated, or with
/// a malformed bar. `series` names the input in the error ("price", "benchmark").
pub fn validate_series(series: &str, bars: &[Bar]) -> Result<()> {
    if bars.is_empty() {
        return Err(EngineError::EmptySeries {
            series: series.to_string(),
        });
    }

    for (i, bar) in bars.iter().enumerate() {
        if let Some(reason) = bar.defect() {
            return Err(EngineError::InvalidBar {
                series: series.to_string(),
                date: bar.date,
                reason: reason.to_string(),
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(EngineError::UnorderedDates {
                series: series.to_string(),
                index: i,
                date: bar.date,
            });
        }
    }

    Ok(())
}
