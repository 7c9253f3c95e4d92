//! Daily alert text.
//!
//! Pure presentation of the latest bar. The field names (Signal, Price,
//! Shares, ATR, ATR Percentile, Trend Filter) are what the notification side
//! parses, so the template is fixed.

use serde::{Deserialize, Serialize};

use crate::engine::SignalRecord;
use crate::sizer::SizingResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub subject: String,
    pub body: String,
}

fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "n/a".to_string(),
    }
}

impl Alert {
    pub fn render(symbol: &str, latest: &SignalRecord, sizing: &SizingResult) -> Self {
        let ind = &latest.indicators;
        let pct = match ind.atr_pct {
            Some(p) => format!("{p:.0}%"),
            None => "n/a".to_string(),
        };

        let body = format!(
            "{symbol} DAILY SIGNAL (Tier-1)\n\
             -------------------------\n\
             Signal: {label}\n\
             Price: ${price:.2}\n\
             Shares (risk-based): {shares}\n\
             ATR: {atr}\n\
             ATR Percentile: {pct}\n\
             Trend Filter: {trend}\n\
             \n\
             This alert is generated after market close.\n\
             Not financial advice.\n",
            label = latest.label,
            price = latest.close,
            shares = sizing.shares,
            atr = fixed(ind.atr, 2),
            trend = if ind.trend_ok { "ON" } else { "OFF" },
        );

        Self {
            subject: format!("{symbol} Daily Trading Signal"),
            body,
        }
    }
}
