//! Stroop engine implementation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::core::{elapsed_ms, ConfigError, GameRng, SharedClock, StroopConfig};
use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

/// Colors used both as words and as ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InkColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl InkColor {
    /// The standard color set.
    pub const ALL: [InkColor; 5] = [
        InkColor::Red,
        InkColor::Blue,
        InkColor::Green,
        InkColor::Yellow,
        InkColor::Purple,
    ];

    /// Lowercase color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            InkColor::Red => "red",
            InkColor::Blue => "blue",
            InkColor::Green => "green",
            InkColor::Yellow => "yellow",
            InkColor::Purple => "purple",
        }
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One stimulus: the word shown and the ink it is shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub word: InkColor,
    pub ink: InkColor,
}

impl Trial {
    /// Create a trial.
    #[must_use]
    pub fn new(word: InkColor, ink: InkColor) -> Self {
        Self { word, ink }
    }

    /// Ink matches the word.
    #[must_use]
    pub fn is_congruent(&self) -> bool {
        self.word == self.ink
    }
}

/// Stroop session state.
#[derive(Clone, Debug)]
pub struct StroopGame {
    config: StroopConfig,
    clock: SharedClock,
    lifecycle: Lifecycle,
    trials: Vec<Trial>,
    current_index: usize,
    correct: usize,
    /// Milliseconds per answered trial.
    reaction_times: Vec<u64>,
    /// Session start, then the time of the latest response.
    last_mark: DateTime<Utc>,
    result: Option<GameResult>,
}

impl StroopGame {
    /// Create an idle engine.
    pub fn new(config: StroopConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let last_mark = clock.now();
        Ok(Self {
            config,
            clock,
            lifecycle: Lifecycle::Idle,
            trials: Vec::new(),
            current_index: 0,
            correct: 0,
            reaction_times: Vec::new(),
            last_mark,
            result: None,
        })
    }

    /// Draw one trial.
    ///
    /// The word is uniform over the color set. With the congruent probability
    /// the ink copies the word; otherwise it is drawn uniformly and may still
    /// match.
    pub fn generate_trial(config: &StroopConfig, rng: &mut GameRng) -> Trial {
        let colors = &config.colors;
        let word = colors[rng.gen_index(colors.len())];
        let ink = if rng.gen_bool(config.congruent_probability) {
            word
        } else {
            colors[rng.gen_index(colors.len())]
        };
        Trial::new(word, ink)
    }

    /// Start a session over fixed trials instead of random ones.
    pub fn start_with_trials(&mut self, trials: Vec<Trial>) -> Progress {
        self.trials = trials;
        self.current_index = 0;
        self.correct = 0;
        self.reaction_times.clear();
        self.last_mark = self.clock.now();
        self.result = None;
        self.lifecycle = Lifecycle::Running;

        info!(game = %GameKind::Stroop, trials = self.trials.len(), "session started");

        if self.trials.is_empty() {
            return self.finish();
        }
        Progress::Continue
    }

    /// Name the ink color of the current trial.
    pub fn respond(&mut self, guess: InkColor) -> Result<Progress, GameError> {
        self.ensure_running("respond")?;

        let now = self.clock.now();
        let trial = self.trials[self.current_index];
        let hit = guess == trial.ink;
        if hit {
            self.correct += 1;
        }

        let reaction = elapsed_ms(self.last_mark, now);
        self.reaction_times.push(reaction);
        self.last_mark = now;

        trace!(
            game = %GameKind::Stroop,
            index = self.current_index,
            %guess,
            ink = %trial.ink,
            reaction_ms = reaction,
            "response scored"
        );

        self.current_index += 1;
        if self.current_index >= self.trials.len() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    fn finish(&mut self) -> Progress {
        let result = GameResult::new(
            GameKind::Stroop,
            Score::RatioWithReaction {
                correct: self.correct,
                total: self.trials.len(),
                mean_reaction_ms: self.mean_reaction_ms(),
            },
            self.clock.now(),
        );

        info!(game = %GameKind::Stroop, score = %result.summary(), "session finished");

        self.lifecycle = Lifecycle::Finished;
        self.result = Some(result.clone());
        Progress::Finished(result)
    }

    // === Views ===

    /// All trials of the session.
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// The trial awaiting a response.
    #[must_use]
    pub fn current_trial(&self) -> Option<&Trial> {
        match self.lifecycle {
            Lifecycle::Running => self.trials.get(self.current_index),
            _ => None,
        }
    }

    /// Index of the trial awaiting a response.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Correct responses so far.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Recorded reaction times in milliseconds.
    #[must_use]
    pub fn reaction_times(&self) -> &[u64] {
        &self.reaction_times
    }

    /// Mean reaction time rounded to whole milliseconds.
    #[must_use]
    pub fn mean_reaction_ms(&self) -> Option<u64> {
        if self.reaction_times.is_empty() {
            return None;
        }
        let total: u64 = self.reaction_times.iter().sum();
        Some((total as f64 / self.reaction_times.len() as f64).round() as u64)
    }

    /// Colors offered as answers.
    #[must_use]
    pub fn colors(&self) -> &[InkColor] {
        &self.config.colors
    }
}

impl MiniGame for StroopGame {
    fn kind(&self) -> GameKind {
        GameKind::Stroop
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn start(&mut self, rng: &mut GameRng) -> Progress {
        let trials = (0..self.config.trial_count)
            .map(|_| Self::generate_trial(&self.config, rng))
            .collect();
        self.start_with_trials(trials)
    }

    fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}
