//! Host that ties the engines to a dashboard.
//!
//! The platform shows a dashboard listing the games and the latest results.
//! Selecting a game opens a fresh session; inputs are routed to it until it
//! finishes, at which point the result is logged and the dashboard returns.
//!
//! Rejected inputs are logged and absorbed, never surfaced as failures.

mod catalog;
mod host;

pub use catalog::{describe, result_row, GameInfo, ResultRow, CATALOG};
pub use host::{ActiveGame, GameInput, Platform, View};
