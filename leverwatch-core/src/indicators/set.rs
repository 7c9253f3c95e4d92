//! Precomputed indicator series for one signal run, and the per-bar view the
//! state machine reads.

use serde::{Deserialize, Serialize};

use super::{percentile_rank, Atr, Indicator, Rsi, Sma};
use crate::config::StrategyParams;
use crate::domain::Bar;
use crate::trend::TrendFilter;

/// Indicator values at a single bar. `None` means the window is not full yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub rsi: Option<f64>,
    pub atr: Option<f64>,
    pub atr_pct: Option<f64>,
    pub trend_ok: bool,
}

/// Full-length indicator series, computed once in a single forward pass.
#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub sma_short: Vec<f64>,
    pub sma_long: Vec<f64>,
    pub rsi: Vec<f64>,
    pub atr: Vec<f64>,
    pub atr_pct: Vec<f64>,
    pub trend_ok: Vec<bool>,
}

fn defined(v: f64) -> Option<f64> {
    if v.is_nan() {
        None
    } else {
        Some(v)
    }
}

impl IndicatorSeries {
    pub fn compute(price: &[Bar], benchmark: &[Bar], params: &StrategyParams) -> Self {
        let atr = Atr::new(params.atr_period).compute(price);
        let atr_pct = percentile_rank(&atr, params.percentile_mode);
        let dates: Vec<_> = price.iter().map(|b| b.date).collect();

        Self {
            sma_short: Sma::new(params.short_ma).compute(price),
            sma_long: Sma::new(params.long_ma).compute(price),
            rsi: Rsi::new(params.rsi_period).compute(price),
            atr,
            atr_pct,
            trend_ok: TrendFilter::new(params.trend_period).gate(&dates, benchmark),
        }
    }

    pub fn len(&self) -> usize {
        self.atr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atr.is_empty()
    }

    /// Indicator values at `bar_index`. Out-of-range indices read as undefined.
    pub fn at(&self, bar_index: usize) -> IndicatorSet {
        let get = |series: &[f64]| series.get(bar_index).copied().and_then(defined);
        IndicatorSet {
            sma_short: get(&self.sma_short),
            sma_long: get(&self.sma_long),
            rsi: get(&self.rsi),
            atr: get(&self.atr),
            atr_pct: get(&self.atr_pct),
            trend_ok: self.trend_ok.get(bar_index).copied().unwrap_or(false),
        }
    }
}
