//! PAL engine implementation.

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::core::{ConfigError, GameRng, PalConfig, SharedClock};
use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

/// A cue word and the target word to recall for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub cue: String,
    pub target: String,
}

impl WordPair {
    /// Create a pair.
    pub fn new(cue: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            cue: cue.into(),
            target: target.into(),
        }
    }

    /// Trimmed, case-insensitive comparison against the target.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.target.trim().to_lowercase()
    }
}

/// Session phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RecallPhase {
    /// Pairs are on display.
    Memorize,
    /// Cues are shown one at a time.
    Recall,
    /// Every cue answered.
    Done,
}

/// PAL session state.
#[derive(Clone, Debug)]
pub struct PalGame {
    config: PalConfig,
    clock: SharedClock,
    started: bool,
    pairs: Vec<WordPair>,
    phase: RecallPhase,
    current_index: usize,
    correct: usize,
    result: Option<GameResult>,
}

impl PalGame {
    /// Create an idle engine.
    pub fn new(config: PalConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            started: false,
            pairs: Vec::new(),
            phase: RecallPhase::Memorize,
            current_index: 0,
            correct: 0,
            result: None,
        })
    }

    /// Start a session with fixed pairs instead of a random draw.
    pub fn start_with_pairs(&mut self, pairs: Vec<WordPair>) -> Progress {
        self.pairs = pairs;
        self.phase = RecallPhase::Memorize;
        self.current_index = 0;
        self.correct = 0;
        self.result = None;
        self.started = true;

        info!(game = %GameKind::Pal, pairs = self.pairs.len(), "session started");
        Progress::Continue
    }

    /// Leave the memorize phase and begin recall.
    pub fn advance_phase(&mut self) -> Result<Progress, GameError> {
        self.ensure_running("advance_phase")?;
        if self.phase != RecallPhase::Memorize {
            return Err(GameError::invalid("advance_phase", Lifecycle::Running));
        }

        self.phase = RecallPhase::Recall;
        self.current_index = 0;

        if self.pairs.is_empty() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    /// Answer the current cue.
    pub fn submit(&mut self, answer: &str) -> Result<Progress, GameError> {
        self.ensure_running("submit")?;
        if self.phase != RecallPhase::Recall {
            return Err(GameError::invalid("submit", Lifecycle::Running));
        }

        let pair = &self.pairs[self.current_index];
        let hit = pair.accepts(answer);
        if hit {
            self.correct += 1;
        }
        trace!(game = %GameKind::Pal, cue = %pair.cue, hit, "answer scored");

        self.current_index += 1;
        if self.current_index >= self.pairs.len() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    fn finish(&mut self) -> Progress {
        let result = GameResult::new(
            GameKind::Pal,
            Score::Ratio {
                correct: self.correct,
                total: self.pairs.len(),
            },
            self.clock.now(),
        );

        info!(game = %GameKind::Pal, score = %result.summary(), "session finished");

        self.phase = RecallPhase::Done;
        self.result = Some(result.clone());
        Progress::Finished(result)
    }

    // === Views ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RecallPhase {
        self.phase
    }

    /// The session's pairs, for display while memorizing.
    #[must_use]
    pub fn pairs(&self) -> &[WordPair] {
        &self.pairs
    }

    /// The cue awaiting an answer during recall.
    #[must_use]
    pub fn current_cue(&self) -> Option<&str> {
        match self.phase {
            RecallPhase::Recall => self.pairs.get(self.current_index).map(|p| p.cue.as_str()),
            _ => None,
        }
    }

    /// Index of the cue awaiting an answer.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Correct answers so far.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }
}

impl MiniGame for PalGame {
    fn kind(&self) -> GameKind {
        GameKind::Pal
    }

    fn lifecycle(&self) -> Lifecycle {
        match (self.started, self.phase) {
            (false, _) => Lifecycle::Idle,
            (true, RecallPhase::Done) => Lifecycle::Finished,
            (true, _) => Lifecycle::Running,
        }
    }

    fn start(&mut self, rng: &mut GameRng) -> Progress {
        let mut pool = self.config.pool.clone();
        rng.shuffle(&mut pool);
        pool.truncate(self.config.pair_count);
        self.start_with_pairs(pool)
    }

    fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}
