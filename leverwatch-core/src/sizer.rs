//! ATR risk position sizer.
//!
//! Classic volatility sizing: risk a fixed fraction of the account per trade,
//! with the stop `stop_atr` ATRs away from entry.
//!
//! # Formula
//! ```text
//! risk_dollars  = account_size * risk_per_trade
//! stop_distance = stop_atr * ATR
//! shares        = floor(risk_dollars / stop_distance)
//! ```
//!
//! Sizing uses only the latest bar's ATR and the configured multiplier. It does
//! not look at an open position, so the distance it assumes can differ from the
//! stop recorded when that position was entered.

use serde::{Deserialize, Serialize};

use crate::config::AccountParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub shares: u64,
    pub risk_dollars: f64,
    /// ATR the size was derived from; `None` if it was undefined.
    pub atr: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AtrRiskSizer {
    /// Account equity in dollars.
    account_size: f64,
    /// Risk fraction per trade (e.g., 0.01 = 1%).
    risk_pct: f64,
    /// ATR multiplier for stop distance (e.g., 2.0 = 2x ATR).
    atr_multiplier: f64,
}

impl AtrRiskSizer {
    pub fn new(account_size: f64, risk_pct: f64, atr_multiplier: f64) -> Self {
        Self {
            account_size,
            risk_pct,
            atr_multiplier,
        }
    }

    pub fn from_params(account: &AccountParams, stop_atr: f64) -> Self {
        Self::new(account.account_size, account.risk_per_trade, stop_atr)
    }

    pub fn risk_dollars(&self) -> f64 {
        self.account_size * self.risk_pct
    }

    /// Size a position from the latest ATR. Zero when ATR is undefined or not
    /// positive; never divides by zero.
    pub fn size(&self, atr: Option<f64>) -> SizingResult {
        let risk_dollars = self.risk_dollars();
        let stop_distance = atr.map(|a| self.atr_multiplier * a);

        let shares = match stop_distance {
            Some(d) if d > 0.0 && d.is_finite() => {
                let raw = (risk_dollars / d).floor();
                if raw.is_finite() && raw > 0.0 {
                    raw as u64
                } else {
                    0
                }
            }
            _ => 0,
        };

        SizingResult {
            shares,
            risk_dollars,
            atr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_example() {
        // 50k account, 1% risk, 2x ATR stop, ATR 5 → 500 / 10 = 50 shares
        let sizer = AtrRiskSizer::new(50_000.0, 0.01, 2.0);
        let result = sizer.size(Some(5.0));
        assert_eq!(result.risk_dollars, 500.0);
        assert_eq!(result.shares, 50);
    }

    #[test]
    fn rounds_down() {
        // 1000 / (2 * 5.33) = 93.8 → 93
        let sizer = AtrRiskSizer::new(100_000.0, 0.01, 2.0);
        assert_eq!(sizer.size(Some(5.33)).shares, 93);
    }

    #[test]
    fn zero_atr_gives_zero_shares() {
        let sizer = AtrRiskSizer::new(50_000.0, 0.01, 2.0);
        let result = sizer.size(Some(0.0));
        assert_eq!(result.shares, 0);
        assert_eq!(result.risk_dollars, 500.0);
    }

    #[test]
    fn undefined_atr_gives_zero_shares() {
        let sizer = AtrRiskSizer::new(50_000.0, 0.01, 2.0);
        assert_eq!(sizer.size(None).shares, 0);
    }

    #[test]
    fn from_params_uses_account_settings() {
        let sizer = AtrRiskSizer::from_params(&AccountParams::default(), 2.0);
        assert_eq!(sizer.risk_dollars(), 500.0);
    }
}
