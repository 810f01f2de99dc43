//! Tower of Hanoi.
//!
//! All disks start on the first peg, largest at the bottom. The player moves
//! one top disk at a time by selecting a source peg then a destination peg.
//! A disk may never rest on a smaller one. The puzzle is solved when every
//! disk sits on the last peg.

mod game;

pub use game::{HanoiGame, Peg};
