//! Engine contract shared by the mini-games.
//!
//! Games implement `MiniGame` to define:
//! - How a session is generated from the injected RNG
//! - The lifecycle the host observes
//! - The single `GameResult` a completed session produces
//!
//! The host drives engines through this trait plus each game's own input
//! methods, and never interprets game-specific state directly.

pub mod engine;

pub use engine::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};
