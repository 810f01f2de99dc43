//! Paired-Associate Learning.
//!
//! The player studies word pairs, then is shown each cue and types the word
//! it was paired with. Phases only move forward:
//! Memorize → Recall → Done.

mod game;

pub use game::{PalGame, RecallPhase, WordPair};
