//! Stroop color-word interference test.
//!
//! Each trial shows a color word printed in some ink color. The player names
//! the ink, not the word. A configurable share of trials is forced congruent
//! (ink == word); the rest draw the ink independently, so some of those are
//! congruent by chance as well.

mod game;

pub use game::{InkColor, StroopGame, Trial};
