//! Date alignment between two series.
//!
//! The benchmark and the traded instrument trade on (almost) the same calendar,
//! but holidays and data gaps differ. Values are carried across by exact date
//! only; a date missing from the source gets the `missing` value, never a
//! forward-filled one.

use chrono::NaiveDate;
use std::collections::HashMap;

/// Map `values` (one per `source_dates` entry) onto the `target_dates` timeline.
pub fn align_to<T: Clone>(
    target_dates: &[NaiveDate],
    source_dates: &[NaiveDate],
    values: &[T],
    missing: T,
) -> Vec<T> {
    debug_assert_eq!(source_dates.len(), values.len());

    let date_map: HashMap<NaiveDate, &T> = source_dates.iter().copied().zip(values).collect();

    target_dates
        .iter()
        .map(|date| {
            date_map
                .get(date)
                .map(|v| (*v).clone())
                .unwrap_or_else(|| missing.clone())
        })
        .collect()
}
