//! Benchmark trend gate.
//!
//! Entries are allowed only while the benchmark closes above its own long SMA
//! (200 bars by default). The SMA runs on the benchmark's timeline; the result
//! is then aligned to the traded instrument by date. A price date with no
//! benchmark bar, or a benchmark SMA still warming up, is "trend not confirmed".

use chrono::NaiveDate;

use crate::data::align_to;
use crate::domain::Bar;
use crate::indicators::{Indicator, Sma};

#[derive(Debug, Clone)]
pub struct TrendFilter {
    sma: Sma,
}

impl TrendFilter {
    pub fn new(period: usize) -> Self {
        Self {
            sma: Sma::new(period),
        }
    }

    pub fn default_params() -> Self {
        Self::new(200)
    }

    pub fn period(&self) -> usize {
        self.sma.period()
    }

    /// `close > SMA` per benchmark bar, on the benchmark's own timeline.
    pub fn benchmark_gate(&self, benchmark: &[Bar]) -> Vec<bool> {
        let sma = self.sma.compute(benchmark);
        benchmark
            .iter()
            .zip(&sma)
            .map(|(bar, &avg)| !avg.is_nan() && bar.close > avg)
            .collect()
    }

    /// Trend gate aligned to `price_dates`.
    pub fn gate(&self, price_dates: &[NaiveDate], benchmark: &[Bar]) -> Vec<bool> {
        let gate = self.benchmark_gate(benchmark);
        let bench_dates: Vec<NaiveDate> = benchmark.iter().map(|b| b.date).collect();
        align_to(price_dates, &bench_dates, &gate, false)
    }
}
