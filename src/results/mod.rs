//! Finished-session records.
//!
//! The host owns one `ResultsLog` and appends each `GameResult` as sessions
//! complete. Dashboards read the most recent entries through `recent`.

mod log;

pub use log::{ResultsLog, SnapshotError};
