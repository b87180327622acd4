#![forbid(unsafe_code)]

//! Latency log reporting: extract timestamp samples from whitespace-delimited
//! logs, average the intervals between consecutive samples, and render one
//! report row per file in file name order.

pub mod config;
pub mod discover;
pub mod error;
pub mod measure;
pub mod report;
pub mod sample;

pub use config::{ErrorPolicy, OutputFormat, ReportConfig};
pub use discover::{discover, resolve_named};
pub use error::{Error, Result};
pub use measure::{measure, ReportEntry};
pub use report::{Outcome, Report};
pub use sample::{parse_line, Samples};
