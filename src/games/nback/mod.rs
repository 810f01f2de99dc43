//! N-Back working-memory task.
//!
//! A sequence of letters is shown one at a time. From position `n` onward the
//! player claims whether the current letter matches the one `n` positions
//! earlier:
//! - The first `n` letters have no back-reference and cannot be answered
//! - Each answer is scored against the true match and advances the sequence
//! - The score is `correct / (length - n)`

mod game;

pub use game::NBackGame;
