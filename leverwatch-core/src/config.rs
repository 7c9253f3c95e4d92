//! Engine configuration: strategy parameters and account risk settings.
//!
//! Every field has a default matching the stock TQQQ/QQQ setup, so a TOML file
//! only needs the values it overrides:
//!
//! ```toml
//! symbol = "TQQQ"
//!
//! [strategy]
//! short_ma = 10
//! stop_atr = 2.5
//!
//! [account]
//! account_size = 25000.0
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::indicators::PercentileMode;

/// Risk fraction above which a warning is logged.
pub const RECOMMENDED_MAX_RISK: f64 = 0.02;

/// Indicator windows, entry/exit thresholds and ATR multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyParams {
    pub short_ma: usize,
    pub long_ma: usize,
    pub rsi_period: usize,
    /// Enter only while RSI is below this level.
    pub rsi_buy: f64,
    /// Exit once RSI rises above this level.
    pub rsi_sell: f64,
    pub atr_period: usize,
    /// Initial stop distance, in ATRs below entry.
    pub stop_atr: f64,
    /// Profit target distance, in ATRs above entry.
    pub target_atr: f64,
    /// Trailing stop distance, in ATRs below the close.
    pub trail_atr: f64,
    /// Maximum ATR percentile (0–100) at which entries are allowed.
    pub volatility_filter: f64,
    /// Benchmark SMA window for the trend gate.
    pub trend_period: usize,
    pub percentile_mode: PercentileMode,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            short_ma: 20,
            long_ma: 100,
            rsi_period: 14,
            rsi_buy: 30.0,
            rsi_sell: 70.0,
            atr_period: 14,
            stop_atr: 2.0,
            target_atr: 4.0,
            trail_atr: 2.0,
            volatility_filter: 80.0,
            trend_period: 200,
            percentile_mode: PercentileMode::FullSample,
        }
    }
}

impl StrategyParams {
    pub fn validate(&self) -> Result<()> {
        for (name, window) in [
            ("short_ma", self.short_ma),
            ("long_ma", self.long_ma),
            ("rsi_period", self.rsi_period),
            ("atr_period", self.atr_period),
            ("trend_period", self.trend_period),
        ] {
            if window == 0 {
                return Err(EngineError::invalid_param(name, "window must be >= 1"));
            }
        }

        for (name, level) in [
            ("rsi_buy", self.rsi_buy),
            ("rsi_sell", self.rsi_sell),
            ("volatility_filter", self.volatility_filter),
        ] {
            if !(0.0..=100.0).contains(&level) {
                return Err(EngineError::invalid_param(
                    name,
                    format!("{level} is outside 0..=100"),
                ));
            }
        }

        for (name, mult) in [
            ("stop_atr", self.stop_atr),
            ("target_atr", self.target_atr),
            ("trail_atr", self.trail_atr),
        ] {
            if !(mult.is_finite() && mult > 0.0) {
                return Err(EngineError::invalid_param(
                    name,
                    format!("multiplier must be positive, got {mult}"),
                ));
            }
        }

        if self.short_ma >= self.long_ma {
            tracing::warn!(
                short_ma = self.short_ma,
                long_ma = self.long_ma,
                "short MA window is not shorter than long MA window"
            );
        }

        Ok(())
    }

    /// Bars needed before every traded-instrument indicator is defined.
    pub fn warmup_bars(&self) -> usize {
        self.short_ma
            .max(self.long_ma)
            .max(self.rsi_period + 1)
            .max(self.atr_period)
    }
}

/// Account size and per-trade risk budget used by the position sizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountParams {
    pub account_size: f64,
    /// Fraction of the account risked per trade (0.01 = 1%).
    pub risk_per_trade: f64,
}

impl Default for AccountParams {
    fn default() -> Self {
        Self {
            account_size: 50_000.0,
            risk_per_trade: 0.01,
        }
    }
}

impl AccountParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.account_size.is_finite() && self.account_size > 0.0) {
            return Err(EngineError::invalid_param(
                "account_size",
                format!("must be positive, got {}", self.account_size),
            ));
        }
        if !(self.risk_per_trade > 0.0 && self.risk_per_trade <= 1.0) {
            return Err(EngineError::invalid_param(
                "risk_per_trade",
                format!("{} is outside (0, 1]", self.risk_per_trade),
            ));
        }
        if self.risk_per_trade > RECOMMENDED_MAX_RISK {
            tracing::warn!(
                risk_per_trade = self.risk_per_trade,
                "risk per trade exceeds the recommended 2%"
            );
        }
        Ok(())
    }
}

/// Complete configuration for one signal run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub symbol: String,
    pub benchmark: String,
    /// Drop bars before this date (inclusive bound).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Drop bars after this date (inclusive bound).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub strategy: StrategyParams,
    pub account: AccountParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            symbol: "TQQQ".into(),
            benchmark: "QQQ".into(),
            start_date: None,
            end_date: None,
            strategy: StrategyParams::default(),
            account: AccountParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(EngineError::invalid_param(
                    "start_date",
                    format!("{start} is after end_date {end}"),
                ));
            }
        }
        self.strategy.validate()?;
        self.account.validate()
    }
}
