//! LeverWatch Core — daily signal engine for a leveraged ETF.
//!
//! This crate contains the whole decision path:
//! - Domain types and input validation (bars, series ordering)
//! - Indicators precomputed once per run (SMA, RSI, ATR, ATR percentile)
//! - Benchmark trend gate aligned by date
//! - FLAT/LONG state machine with ATR stop, target and ratcheting trail
//! - ATR risk position sizing and the daily alert text
//! - CSV/JSON export and run fingerprinting
//!
//! Everything runs as one synchronous forward pass; no state survives between
//! invocations.

pub mod alert;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod fingerprint;
pub mod indicators;
pub mod report;
pub mod sizer;
pub mod trend;

pub use config::{AccountParams, EngineConfig, StrategyParams};
pub use error::{EngineError, Result};
pub use report::{generate, SignalReport};
