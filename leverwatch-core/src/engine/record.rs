//! Per-bar engine output.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicators::IndicatorSet;

/// Decision label emitted for every bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalLabel {
    /// First bar of the series; nothing is evaluated.
    #[serde(rename = "CASH")]
    Cash,
    /// Flat and entry conditions not met.
    #[serde(rename = "NO TRADE")]
    NoTrade,
    #[serde(rename = "BUY")]
    Buy,
    /// In a position with no exit condition met.
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "TRAIL STOP")]
    TrailStop,
    #[serde(rename = "TAKE PROFIT")]
    TakeProfit,
}

impl SignalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::NoTrade => "NO TRADE",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::TrailStop => "TRAIL STOP",
            Self::TakeProfit => "TAKE PROFIT",
        }
    }

    /// True for the three labels that close a position.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Sell | Self::TrailStop | Self::TakeProfit)
    }

    /// True when a position is open at the close of the bar.
    pub fn is_in_position(&self) -> bool {
        matches!(self, Self::Buy | Self::Hold)
    }
}

impl fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bar of the signal series.
///
/// `stop`, `target` and `trail` are set on BUY (entry levels), HOLD (live
/// levels after the ratchet) and exit bars (levels in force when the exit
/// fired). They are `None` while flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub label: SignalLabel,
    pub indicators: IndicatorSet,
    pub stop: Option<f64>,
    pub target: Option<f64>,
    pub trail: Option<f64>,
}
