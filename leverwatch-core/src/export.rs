//! Export of a signal run for charting and inspection.
//!
//! - **CSV**: one row per bar with indicators, label and stop/target/trail.
//!   Undefined values are written as empty cells.
//! - **JSON**: the full `SignalReport`, with `schema_version`. Unknown (newer)
//!   versions are rejected on load.

use crate::engine::SignalRecord;
use crate::error::{EngineError, Result};
use crate::report::{SignalReport, SCHEMA_VERSION};

// ─── CSV export ─────────────────────────────────────────────────────

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

/// Export the per-bar signal series as CSV.
///
/// Columns: date, close, signal, sma_short, sma_long, rsi, atr, atr_pct,
/// trend_ok, stop, target, trail
pub fn export_signals_csv(records: &[SignalRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "close",
        "signal",
        "sma_short",
        "sma_long",
        "rsi",
        "atr",
        "atr_pct",
        "trend_ok",
        "stop",
        "target",
        "trail",
    ])?;

    for r in records {
        let ind = &r.indicators;
        wtr.write_record([
            r.date.to_string(),
            format!("{:.6}", r.close),
            r.label.to_string(),
            cell(ind.sma_short),
            cell(ind.sma_long),
            cell(ind.rsi),
            cell(ind.atr),
            cell(ind.atr_pct),
            ind.trend_ok.to_string(),
            cell(r.stop),
            cell(r.target),
            cell(r.trail),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| EngineError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SignalReport` to pretty JSON.
pub fn export_json(report: &SignalReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Deserialize a `SignalReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<SignalReport> {
    let report: SignalReport = serde_json::from_str(json)?;
    if report.schema_version > SCHEMA_VERSION {
        return Err(EngineError::UnsupportedSchema {
            found: report.schema_version,
            supported: SCHEMA_VERSION,
        });
    }
    Ok(report)
}
