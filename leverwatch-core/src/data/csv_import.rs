//! CSV bar import.
//!
//! Accepts `date,open,high,low,close[,volume]` with any header casing, so a
//! Yahoo Finance export (`Date,Open,High,Low,Close,Adj Close,Volume`) loads
//! unchanged. Extra columns are ignored. Rows with a missing or unparsable
//! price (Yahoo writes `null` on halted days) are dropped, not treated as
//! errors. Ordering is not checked here; `validate_series` does that.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::Bar;
use crate::error::{EngineError, Result};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

/// Parse `YYYY-MM-DD`, tolerating a trailing time component.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| EngineError::DateParse {
        value: value.to_string(),
    })
}

/// Read bars from any CSV source.
pub fn read_csv<R: Read>(source: R) -> Result<Vec<Bar>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    reader.set_headers(headers);

    let mut bars = Vec::new();
    let mut dropped = 0usize;
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let date = parse_date(&row.date)?;
        match (row.open, row.high, row.low, row.close) {
            (Some(open), Some(high), Some(low), Some(close)) => {
                let mut bar = Bar::new(date, open, high, low, close);
                bar.volume = row.volume.map(|v| v.max(0.0) as u64).unwrap_or(0);
                bars.push(bar);
            }
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, "skipped rows with missing prices");
    }

    Ok(bars)
}

/// Load bars from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<Vec<Bar>> {
    let file = std::fs::File::open(path)?;
    let bars = read_csv(file)?;
    tracing::debug!(path = %path.display(), bars = bars.len(), "loaded csv");
    Ok(bars)
}

/// Keep bars whose date lies within `[start, end]`; open bounds keep everything.
pub fn filter_date_range(
    bars: Vec<Bar>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<Bar> {
    bars.into_iter()
        .filter(|b| start.map_or(true, |s| b.date >= s))
        .filter(|b| end.map_or(true, |e| b.date <= e))
        .collect()
}
