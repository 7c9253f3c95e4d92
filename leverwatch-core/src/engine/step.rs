//! The per-bar transition function.
//!
//! `step` is pure: it takes the state at the start of a bar and returns the
//! state at its close together with that bar's record. Entry is evaluated only
//! when the bar starts FLAT, so a position closed on a bar cannot reopen on it.
//!
//! Exit priority while LONG (worst-case fill assumption):
//! 1. low <= trail   → TRAIL STOP
//! 2. high >= target → TAKE PROFIT
//! 3. SMA_S < SMA_L or RSI > rsi_sell → SELL
//! 4. otherwise      → HOLD

use super::record::{SignalLabel, SignalRecord};
use super::state::{OpenPosition, PositionState};
use crate::config::StrategyParams;
use crate::domain::Bar;
use crate::indicators::IndicatorSet;

/// All entry conditions hold, with every input defined.
pub fn entry_allowed(ind: &IndicatorSet, params: &StrategyParams) -> bool {
    let (Some(sma_s), Some(sma_l), Some(rsi), Some(atr), Some(atr_pct)) =
        (ind.sma_short, ind.sma_long, ind.rsi, ind.atr, ind.atr_pct)
    else {
        return false;
    };

    sma_s > sma_l
        && rsi < params.rsi_buy
        && ind.trend_ok
        && atr_pct < params.volatility_filter
        && atr.is_finite()
}

/// Momentum reversal exit. Undefined inputs never trigger it.
pub fn reversal(ind: &IndicatorSet, params: &StrategyParams) -> bool {
    let cross_down = matches!((ind.sma_short, ind.sma_long), (Some(s), Some(l)) if s < l);
    let overbought = ind.rsi.is_some_and(|r| r > params.rsi_sell);
    cross_down || overbought
}

pub fn step(
    state: PositionState,
    bar: &Bar,
    ind: &IndicatorSet,
    params: &StrategyParams,
) -> (PositionState, SignalRecord) {
    let record = |label, levels: Option<&OpenPosition>| SignalRecord {
        date: bar.date,
        close: bar.close,
        label,
        indicators: *ind,
        stop: levels.map(|p| p.stop),
        target: levels.map(|p| p.target),
        trail: levels.map(|p| p.trail.level()),
    };

    match state {
        PositionState::Flat => {
            if !entry_allowed(ind, params) {
                return (PositionState::Flat, record(SignalLabel::NoTrade, None));
            }
            // entry_allowed guarantees a defined ATR
            let atr = ind.atr.unwrap_or(f64::NAN);
            let pos = OpenPosition::open(
                bar.date,
                bar.close,
                atr,
                params.stop_atr,
                params.target_atr,
            );
            tracing::debug!(
                date = %bar.date,
                entry = pos.entry,
                stop = pos.stop,
                target = pos.target,
                "BUY"
            );
            (PositionState::Long(pos), record(SignalLabel::Buy, Some(&pos)))
        }
        PositionState::Long(mut pos) => {
            if let Some(atr) = ind.atr {
                pos.trail.ratchet(bar.close - params.trail_atr * atr);
            }

            let exit = if bar.low <= pos.trail.level() {
                Some(SignalLabel::TrailStop)
            } else if bar.high >= pos.target {
                Some(SignalLabel::TakeProfit)
            } else if reversal(ind, params) {
                Some(SignalLabel::Sell)
            } else {
                None
            };

            match exit {
                Some(label) => {
                    tracing::debug!(
                        date = %bar.date,
                        %label,
                        entry = pos.entry,
                        close = bar.close,
                        trail = pos.trail.level(),
                        "exit"
                    );
                    (PositionState::Flat, record(label, Some(&pos)))
                }
                None => (PositionState::Long(pos), record(SignalLabel::Hold, Some(&pos))),
            }
        }
    }
}
