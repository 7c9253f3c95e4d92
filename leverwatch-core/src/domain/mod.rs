//! Domain types for LeverWatch

pub mod bar;

pub use bar::{validate_series, Bar};
