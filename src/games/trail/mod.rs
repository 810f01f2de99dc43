//! Trail-Making test.
//!
//! Numbered targets are scattered over a grid. The player clicks them in
//! ascending order as fast as possible; out-of-order clicks are ignored. The
//! score is the time from the start to the final click.

mod game;

pub use game::{Cell, Target, TrailGame};
