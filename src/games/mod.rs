//! The five cognitive mini-games.
//!
//! Each game lives in its own module with a single engine type implementing
//! `MiniGame`, plus the game-specific input methods the host calls.

pub mod hanoi;
pub mod nback;
pub mod pal;
pub mod stroop;
pub mod trail;
