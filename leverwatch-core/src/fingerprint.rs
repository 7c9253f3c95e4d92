//! Run fingerprinting — deterministic identification of a signal run.
//!
//! Every invocation recomputes the whole history, so two runs with the same
//! config and the same input bars must produce identical output. The
//! fingerprint is a BLAKE3 hash over the canonical JSON of the config and the
//! raw OHLC values of both series, letting a consumer tell whether a report
//! can be reused.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;
use crate::domain::Bar;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunFingerprint(pub String);

impl fmt::Display for RunFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn hash_bars(hasher: &mut blake3::Hasher, label: &str, bars: &[Bar]) {
    hasher.update(label.as_bytes());
    hasher.update(&(bars.len() as u64).to_le_bytes());
    for bar in bars {
        hasher.update(bar.date.to_string().as_bytes());
        for v in [bar.open, bar.high, bar.low, bar.close] {
            hasher.update(&v.to_le_bytes());
        }
    }
}

impl RunFingerprint {
    pub fn compute(config: &EngineConfig, price: &[Bar], benchmark: &[Bar]) -> Self {
        let mut hasher = blake3::Hasher::new();
        // EngineConfig holds only plain fields; serialization cannot fail
        let json = serde_json::to_string(config).unwrap_or_default();
        hasher.update(json.as_bytes());
        hash_bars(&mut hasher, "price", price);
        hash_bars(&mut hasher, "benchmark", benchmark);
        Self(hasher.finalize().to_hex().to_string())
    }

    /// First 12 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}
