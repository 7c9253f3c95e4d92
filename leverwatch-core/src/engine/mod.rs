//! Signal engine — the FLAT/LONG state machine folded over the price series.
//!
//! Indicators are precomputed; the scan walks the bars once in ascending date
//! order, threading `PositionState` through the pure `step` function. Bar 0 is
//! always `CASH`: nothing is evaluated before a previous bar exists.

pub mod ratchet;
pub mod record;
pub mod state;
pub mod step;

pub use ratchet::TrailingStop;
pub use record::{SignalLabel, SignalRecord};
pub use state::{OpenPosition, PositionState};
pub use step::{entry_allowed, reversal, step};

use crate::config::StrategyParams;
use crate::domain::Bar;
use crate::indicators::IndicatorSeries;

/// Output of one full scan.
#[derive(Debug, Clone)]
pub struct SignalRun {
    pub records: Vec<SignalRecord>,
    /// State after the last bar (LONG if a position is still open).
    pub final_state: PositionState,
}

impl SignalRun {
    pub fn latest(&self) -> Option<&SignalRecord> {
        self.records.last()
    }

    pub fn count(&self, label: SignalLabel) -> usize {
        self.records.iter().filter(|r| r.label == label).count()
    }
}

/// Run the state machine over `bars`. `indicators` must have been computed
/// from the same bars.
pub fn run_signals(
    bars: &[Bar],
    indicators: &IndicatorSeries,
    params: &StrategyParams,
) -> SignalRun {
    debug_assert_eq!(bars.len(), indicators.len());

    let mut records = Vec::with_capacity(bars.len());
    let mut state = PositionState::Flat;

    for (i, bar) in bars.iter().enumerate() {
        let ind = indicators.at(i);
        if i == 0 {
            records.push(SignalRecord {
                date: bar.date,
                close: bar.close,
                label: SignalLabel::Cash,
                indicators: ind,
                stop: None,
                target: None,
                trail: None,
            });
            continue;
        }

        let (next, record) = step(state, bar, &ind, params);
        state = next;
        records.push(record);
    }

    let run = SignalRun {
        records,
        final_state: state,
    };

    tracing::info!(
        bars = bars.len(),
        buys = run.count(SignalLabel::Buy),
        trail_stops = run.count(SignalLabel::TrailStop),
        take_profits = run.count(SignalLabel::TakeProfit),
        sells = run.count(SignalLabel::Sell),
        in_position = !run.final_state.is_flat(),
        "signal scan complete"
    );

    run
}
