//! io — CSV input and output around the estimator.
//!
//! - [`reader`]: parse a date-indexed CSV into a validated `Panel`.
//! - [`writer`]: write a `ResultTable` as CSV with empty undefined cells.
//! - [`errors`]: [`IoError`] for file, CSV and panel failures.
//!
//! The estimator itself never touches files; this module is the only place
//! that does.

pub mod errors;
pub mod reader;
pub mod writer;

pub use self::errors::{IoError, IoResult};
pub use self::reader::{DEFAULT_RATE_COLUMN, read_panel, read_panel_path};
pub use self::writer::{write_results, write_results_path};
