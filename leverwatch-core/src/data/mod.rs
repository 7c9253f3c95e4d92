//! Market data input: CSV import, date-range filtering and date alignment.
//!
//! The engine never fetches data itself. Bars arrive from files written by an
//! external downloader (Yahoo Finance exports work as-is).

pub mod align;
pub mod csv_import;

pub use align::align_to;
pub use csv_import::{filter_date_range, load_csv, read_csv};
