//! Structured error types for the signal engine.
//!
//! Every failure is raised before the per-bar scan starts: bad input data or a
//! misconfigured parameter. The scan itself is infallible.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{series} series is empty")]
    EmptySeries { series: String },

    #[error("{series} series is not strictly ascending at index {index} ({date})")]
    UnorderedDates {
        series: String,
        index: usize,
        date: NaiveDate,
    },

    #[error("{series} bar on {date} is invalid: {reason}")]
    InvalidBar {
        series: String,
        date: NaiveDate,
        reason: String,
    },

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    #[error("cannot parse date '{value}' (expected YYYY-MM-DD)")]
    DateParse { value: String },

    #[error("unsupported report schema version {found} (max supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
