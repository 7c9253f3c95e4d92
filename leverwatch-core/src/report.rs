//! End-to-end signal run: validate → indicators → trend gate → state machine →
//! sizing → alert.
//!
//! This is the entry point collaborators call. Input problems surface as
//! `EngineError` before any bar is scanned; once validation passes the rest
//! of the pass cannot fail.

use serde::{Deserialize, Serialize};

use crate::alert::Alert;
use crate::config::EngineConfig;
use crate::data::filter_date_range;
use crate::domain::{validate_series, Bar};
use crate::engine::{run_signals, PositionState, SignalRecord};
use crate::error::{EngineError, Result};
use crate::fingerprint::RunFingerprint;
use crate::indicators::IndicatorSeries;
use crate::sizer::{AtrRiskSizer, SizingResult};

/// Bumped whenever the serialized report layout changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything one invocation produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    pub schema_version: u32,
    pub fingerprint: RunFingerprint,
    pub config: EngineConfig,
    pub signals: Vec<SignalRecord>,
    pub final_state: PositionState,
    pub sizing: SizingResult,
    pub alert: Alert,
}

impl SignalReport {
    pub fn latest(&self) -> Option<&SignalRecord> {
        self.signals.last()
    }
}

/// Run the whole pipeline over already-loaded bars.
///
/// The config's date range is applied to both series before validation.
pub fn generate(config: &EngineConfig, price: Vec<Bar>, benchmark: Vec<Bar>) -> Result<SignalReport> {
    config.validate()?;

    let price = filter_date_range(price, config.start_date, config.end_date);
    let benchmark = filter_date_range(benchmark, config.start_date, config.end_date);
    validate_series("price", &price)?;
    validate_series("benchmark", &benchmark)?;

    let fingerprint = RunFingerprint::compute(config, &price, &benchmark);
    let params = &config.strategy;

    if price.len() < params.warmup_bars() {
        tracing::warn!(
            bars = price.len(),
            warmup = params.warmup_bars(),
            "price history shorter than indicator warm-up; no entries possible"
        );
    }
    if benchmark.len() < params.trend_period {
        tracing::warn!(
            bars = benchmark.len(),
            trend_period = params.trend_period,
            "benchmark history shorter than trend window; trend gate stays off"
        );
    }

    tracing::info!(
        symbol = %config.symbol,
        benchmark = %config.benchmark,
        bars = price.len(),
        fingerprint = fingerprint.short(),
        "computing signals"
    );

    let indicators = IndicatorSeries::compute(&price, &benchmark, params);
    let run = run_signals(&price, &indicators, params);

    let sizer = AtrRiskSizer::from_params(&config.account, params.stop_atr);
    let Some(latest) = run.latest().cloned() else {
        return Err(EngineError::EmptySeries {
            series: "price".into(),
        });
    };
    let sizing = sizer.size(latest.indicators.atr);
    let alert = Alert::render(&config.symbol, &latest, &sizing);

    tracing::info!(
        date = %latest.date,
        signal = %latest.label,
        shares = sizing.shares,
        "latest signal"
    );

    Ok(SignalReport {
        schema_version: SCHEMA_VERSION,
        fingerprint,
        config: config.clone(),
        signals: run.records,
        final_state: run.final_state,
        sizing,
        alert,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SignalLabel;
    use crate::indicators::make_bars;

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.strategy.short_ma = 3;
        config.strategy.long_ma = 5;
        config.strategy.rsi_period = 3;
        config.strategy.atr_period = 3;
        config.strategy.trend_period = 5;
        config
    }

    #[test]
    fn flat_market_report() {
        let bars = make_bars(&[100.0; 20]);
        let report = generate(&small_config(), bars.clone(), bars).unwrap();
        assert_eq!(report.signals.len(), 20);
        assert_eq!(report.latest().unwrap().label, SignalLabel::NoTrade);
        // constant bars: TR = 2 each day → ATR 2 → 500 / 4 = 125
        assert_eq!(report.sizing.shares, 125);
        assert!(report.alert.body.contains("Shares (risk-based): 125"));
        assert_eq!(report.schema_version, SCHEMA_VERSION);
    }

    #[test]
    fn empty_price_rejected() {
        let bench = make_bars(&[100.0; 5]);
        let err = generate(&small_config(), Vec::new(), bench).unwrap_err();
        assert!(matches!(err, EngineError::EmptySeries { ref series } if series == "price"));
    }

    #[test]
    fn date_range_emptying_series_rejected() {
        let bars = make_bars(&[100.0; 5]);
        let mut config = small_config();
        config.start_date = chrono::NaiveDate::from_ymd_opt(2030, 1, 1);
        assert!(generate(&config, bars.clone(), bars).is_err());
    }

    #[test]
    fn invalid_config_rejected_before_scan() {
        let bars = make_bars(&[100.0; 5]);
        let mut config = small_config();
        config.account.account_size = -1.0;
        let err = generate(&config, bars.clone(), bars).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParam { .. }));
    }
}
