//! Shared engine contract.
//!
//! Every mini-game implements `MiniGame`:
//! - A lifecycle (Idle → Running → Finished)
//! - `start` to (re)generate a session from an injected RNG
//! - Exactly one `GameResult` per completed session, returned as
//!   `Progress::Finished` from whichever operation completed it
//!
//! Game-specific inputs (`respond`, `select_peg`, `submit`, `click`, ...)
//! live on the concrete engine types and return `Result<Progress, GameError>`.
//! An `Err` is a rejected input: the engine state is left as it was.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameRng;

/// Which mini-game produced a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    NBack,
    Stroop,
    Pal,
    Hanoi,
    TrailMaking,
}

impl GameKind {
    /// Every game, in dashboard order.
    pub const ALL: [GameKind; 5] = [
        GameKind::NBack,
        GameKind::Stroop,
        GameKind::Pal,
        GameKind::Hanoi,
        GameKind::TrailMaking,
    ];

    /// Short stable identifier.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            GameKind::NBack => "nback",
            GameKind::Stroop => "stroop",
            GameKind::Pal => "pal",
            GameKind::Hanoi => "toh",
            GameKind::TrailMaking => "tmt",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameKind::NBack => "N-Back Game",
            GameKind::Stroop => "Stroop Test",
            GameKind::Pal => "Paired Associate Learning (PAL) Test",
            GameKind::Hanoi => "Tower of Hanoi",
            GameKind::TrailMaking => "Trail Making Test",
        }
    }

    /// Look up a game by its key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Structured score of a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Score {
    /// `correct / total`.
    Ratio { correct: usize, total: usize },
    /// `correct / total` plus mean reaction time; `None` when nothing was timed.
    RatioWithReaction {
        correct: usize,
        total: usize,
        mean_reaction_ms: Option<u64>,
    },
    /// Moves used to solve a puzzle.
    Moves(u32),
    /// Time to completion.
    Elapsed { millis: u64 },
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Ratio { correct, total } => write!(f, "{correct} / {total}"),
            Score::RatioWithReaction {
                correct,
                total,
                mean_reaction_ms,
            } => match mean_reaction_ms {
                Some(ms) => write!(f, "{correct} / {total} (Avg RT: {ms} ms)"),
                None => write!(f, "{correct} / {total} (Avg RT: - ms)"),
            },
            Score::Moves(moves) => write!(f, "{moves} moves"),
            Score::Elapsed { millis } => {
                // Hundredths, rounded half up.
                let centis = (millis + 5) / 10;
                write!(f, "{}.{:02} s", centis / 100, centis % 100)
            }
        }
    }
}

/// Record of one completed session. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    kind: GameKind,
    score: Score,
    timestamp: DateTime<Utc>,
}

impl GameResult {
    /// Create a result.
    #[must_use]
    pub fn new(kind: GameKind, score: Score, timestamp: DateTime<Utc>) -> Self {
        Self {
            kind,
            score,
            timestamp,
        }
    }

    /// The game that produced this result.
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Structured score.
    #[must_use]
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Human-readable score summary, e.g. `"3 / 3"` or `"7 moves"`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.score.to_string()
    }

    /// Completion time.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Completion time as RFC 3339 with millisecond precision.
    #[must_use]
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Engine lifecycle shared by every game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Constructed, not yet started.
    Idle,
    /// Accepting inputs.
    Running,
    /// Result emitted; only `start` (or nothing) is accepted.
    Finished,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Idle => f.write_str("idle"),
            Lifecycle::Running => f.write_str("running"),
            Lifecycle::Finished => f.write_str("finished"),
        }
    }
}

/// Outcome of an accepted input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// Session continues.
    Continue,
    /// Session completed with this result.
    Finished(GameResult),
}

impl Progress {
    /// The result, if this input completed the session.
    #[must_use]
    pub fn into_result(self) -> Option<GameResult> {
        match self {
            Progress::Continue => None,
            Progress::Finished(result) => Some(result),
        }
    }

    /// Check if the session completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished(_))
    }
}

/// A rejected input. Never fatal: the engine state is unchanged
/// (an illegal Hanoi move also clears the peg selection).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Input arrived before `start` or after completion, or in the wrong phase.
    #[error("{action} is not accepted while {state}")]
    InvalidTransition {
        action: &'static str,
        state: Lifecycle,
    },

    /// Hanoi move that breaks the stacking rule.
    #[error("illegal move from peg {from} to peg {to}")]
    IllegalMove { from: usize, to: usize },

    /// Hanoi peg index out of range.
    #[error("peg {index} does not exist ({pegs} pegs)")]
    NoSuchPeg { index: usize, pegs: usize },

    /// N-Back response before a back-reference exists.
    #[error("no {n}-back reference at position {index}")]
    NoBackReference { index: usize, n: usize },

    /// Trail target clicked out of order.
    #[error("clicked {clicked}, expected {expected}")]
    OutOfOrder { expected: u32, clicked: u32 },

    /// The host routed an input this game does not take.
    #[error("{game} does not accept {input}")]
    UnsupportedInput {
        game: GameKind,
        input: &'static str,
    },
}

impl GameError {
    /// Rejection for an input arriving in the wrong lifecycle state.
    #[must_use]
    pub fn invalid(action: &'static str, state: Lifecycle) -> Self {
        GameError::InvalidTransition { action, state }
    }
}

/// Mini-game engine trait.
///
/// ## Implementation Notes
///
/// - `start`: draw all randomness from the given RNG so sessions replay
/// - `lifecycle`: `Finished` exactly when the result has been emitted
/// - `result_delay`: how long a host should keep the final state on screen
///   before consuming the result
pub trait MiniGame {
    /// Which game this is.
    fn kind(&self) -> GameKind;

    /// Current lifecycle state.
    fn lifecycle(&self) -> Lifecycle;

    /// Start a fresh session, discarding any previous one.
    ///
    /// Returns `Progress::Finished` immediately for degenerate configurations
    /// that have nothing to play.
    fn start(&mut self, rng: &mut GameRng) -> Progress;

    /// The emitted result, once finished.
    fn result(&self) -> Option<&GameResult>;

    /// Delay before a host should record the result.
    fn result_delay(&self) -> Duration {
        Duration::zero()
    }

    /// Reject inputs unless the session is running.
    fn ensure_running(&self, action: &'static str) -> Result<(), GameError> {
        match self.lifecycle() {
            Lifecycle::Running => Ok(()),
            other => Err(GameError::invalid(action, other)),
        }
    }
}
