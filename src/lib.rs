//! # neuro-games
//!
//! Rule engines for the Neuro Detect cognitive mini-games.
//!
//! ## Design Principles
//!
//! 1. **Engines own their state**: Each game is a plain struct mutated through
//!    explicit input methods. No engine shares mutable state with another.
//!
//! 2. **Injected randomness and time**: `start` takes a seedable `GameRng`;
//!    timing reads an injected `Clock`. Sessions replay exactly in tests.
//!
//! 3. **Rejections are not failures**: Inputs that arrive at the wrong time
//!    return a `GameError` and leave state untouched. Hosts log and move on.
//!
//! ## Modules
//!
//! - `core`: RNG, clock, configuration
//! - `rules`: `MiniGame` trait, lifecycle, `GameResult`, errors
//! - `games`: N-Back, Stroop, PAL, Tower of Hanoi, Trail-Making
//! - `results`: `ResultsLog` of finished sessions
//! - `platform`: dashboard host routing inputs and collecting results

pub mod core;
pub mod rules;
pub mod games;
pub mod results;
pub mod platform;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, GameRng, ManualClock, PlatformConfig, SharedClock, SystemClock,
};

pub use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

pub use crate::games::{
    hanoi::HanoiGame,
    nback::NBackGame,
    pal::{PalGame, RecallPhase, WordPair},
    stroop::{InkColor, StroopGame, Trial},
    trail::{Cell, Target, TrailGame},
};

pub use crate::results::{ResultsLog, SnapshotError};

pub use crate::platform::{ActiveGame, GameInfo, GameInput, Platform, View};
