//! Percentile rank of a series (used for the ATR volatility regime).
//!
//! Rank semantics: ties share the average of their ordinal ranks, the rank is
//! divided by the number of defined values and scaled to 0–100. NaN inputs are
//! skipped and stay NaN.
//!
//! `FullSample` ranks every value against the entire series, so the rank at
//! bar t depends on bars after t. That look-ahead is the reference behavior
//! and the default. `Expanding` ranks bar t only against values up to and
//! including t.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileMode {
    #[default]
    FullSample,
    Expanding,
}

pub fn percentile_rank(values: &[f64], mode: PercentileMode) -> Vec<f64> {
    match mode {
        PercentileMode::FullSample => full_sample_rank(values),
        PercentileMode::Expanding => expanding_rank(values),
    }
}

/// Average rank of `v` within an ascending slice, as a 0–100 percentile.
fn rank_in_sorted(sorted: &[f64], v: f64) -> f64 {
    let less = sorted.partition_point(|x| *x < v);
    let less_or_equal = sorted.partition_point(|x| *x <= v);
    let ties = (less_or_equal - less) as f64;
    let avg_rank = less as f64 + (ties + 1.0) / 2.0;
    avg_rank / sorted.len() as f64 * 100.0
}

fn full_sample_rank(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                f64::NAN
            } else {
                rank_in_sorted(&sorted, v)
            }
        })
        .collect()
}

fn expanding_rank(values: &[f64]) -> Vec<f64> {
    let mut seen: Vec<f64> = Vec::with_capacity(values.len());

    values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return f64::NAN;
            }
            let at = seen.partition_point(|x| *x < v);
            seen.insert(at, v);
            rank_in_sorted(&seen, v)
        })
        .collect()
}
