//! N-Back engine implementation.

use tracing::{debug, info, trace};

use crate::core::{ConfigError, GameRng, NBackConfig, SharedClock};
use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

/// N-Back session state.
#[derive(Clone, Debug)]
pub struct NBackGame {
    config: NBackConfig,
    clock: SharedClock,
    lifecycle: Lifecycle,
    sequence: Vec<char>,
    /// Only ever moves forward.
    current_index: usize,
    responses: Vec<bool>,
    correct: usize,
    result: Option<GameResult>,
}

impl NBackGame {
    /// Create an idle engine.
    pub fn new(config: NBackConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            lifecycle: Lifecycle::Idle,
            sequence: Vec::new(),
            current_index: 0,
            responses: Vec::new(),
            correct: 0,
            result: None,
        })
    }

    /// Start a session over a fixed sequence instead of a random one.
    pub fn start_with_sequence(&mut self, sequence: Vec<char>) -> Progress {
        self.sequence = sequence;
        self.current_index = 0;
        self.responses.clear();
        self.correct = 0;
        self.result = None;
        self.lifecycle = Lifecycle::Running;

        info!(
            game = %GameKind::NBack,
            length = self.sequence.len(),
            n = self.config.n,
            "session started"
        );

        if self.sequence.len() <= self.config.n {
            // Nothing is scoreable.
            return self.finish();
        }
        Progress::Continue
    }

    /// Answer "match" (`true`) or "no match" (`false`) for the current letter.
    pub fn respond(&mut self, is_match: bool) -> Result<Progress, GameError> {
        self.ensure_running("respond")?;

        let n = self.config.n;
        let index = self.current_index;
        if index < n {
            debug!(game = %GameKind::NBack, index, n, "response before back-reference ignored");
            return Err(GameError::NoBackReference { index, n });
        }

        let truth = self.sequence[index] == self.sequence[index - n];
        if is_match == truth {
            self.correct += 1;
        }
        self.responses.push(is_match);
        self.current_index += 1;

        trace!(game = %GameKind::NBack, index, is_match, truth, "response scored");

        if self.current_index >= self.sequence.len() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    /// Move past a letter that cannot be answered yet.
    ///
    /// Hosts call this to reveal the first `n` letters. Scoreable letters must be
    /// answered with `respond`.
    pub fn reveal_next(&mut self) -> Result<Progress, GameError> {
        self.ensure_running("reveal_next")?;

        let n = self.config.n;
        if self.current_index >= n {
            return Err(GameError::invalid("reveal_next", Lifecycle::Running));
        }
        self.current_index += 1;
        Ok(Progress::Continue)
    }

    fn finish(&mut self) -> Progress {
        let total = self.scoreable_count();
        let result = GameResult::new(
            GameKind::NBack,
            Score::Ratio {
                correct: self.correct,
                total,
            },
            self.clock.now(),
        );

        info!(game = %GameKind::NBack, score = %result.summary(), "session finished");

        self.lifecycle = Lifecycle::Finished;
        self.result = Some(result.clone());
        Progress::Finished(result)
    }

    // === Views ===

    /// Back distance.
    #[must_use]
    pub fn n(&self) -> usize {
        self.config.n
    }

    /// The full session sequence.
    #[must_use]
    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    /// Index of the letter currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The letter currently shown.
    #[must_use]
    pub fn current_symbol(&self) -> Option<char> {
        self.sequence.get(self.current_index).copied()
    }

    /// The letter `n` positions back, once one exists.
    #[must_use]
    pub fn back_reference(&self) -> Option<char> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }
        self.current_index
            .checked_sub(self.config.n)
            .and_then(|i| self.sequence.get(i).copied())
    }

    /// Claims made so far, in order.
    #[must_use]
    pub fn responses(&self) -> &[bool] {
        &self.responses
    }

    /// Correct claims so far.
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Letters that can be scored: `length - n`, or zero.
    #[must_use]
    pub fn scoreable_count(&self) -> usize {
        self.sequence.len().saturating_sub(self.config.n)
    }

    /// 1-based position and sequence length.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        let len = self.sequence.len();
        ((self.current_index + 1).min(len), len)
    }
}

impl MiniGame for NBackGame {
    fn kind(&self) -> GameKind {
        GameKind::NBack
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn start(&mut self, rng: &mut GameRng) -> Progress {
        let alphabet = &self.config.alphabet;
        let sequence = (0..self.config.sequence_length)
            .map(|_| alphabet[rng.gen_index(alphabet.len())])
            .collect();
        self.start_with_sequence(sequence)
    }

    fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::sync::Arc;

    fn game(n: usize, len: usize) -> NBackGame {
        let config = NBackConfig::default().with_n(n).with_sequence_length(len);
        NBackGame::new(config, Arc::new(ManualClock::at_epoch())).unwrap()
    }

    #[test]
    fn test_respond_before_start_rejected() {
        let mut g = game(2, 5);
        assert_eq!(g.lifecycle(), Lifecycle::Idle);
        assert!(matches!(
            g.respond(true),
            Err(GameError::InvalidTransition { .. })
        ));
        assert!(g.responses().is_empty());
    }

    #[test]
    fn test_respond_without_back_reference_rejected() {
        let mut g = game(2, 5);
        g.start_with_sequence("ABACA".chars().collect());

        assert_eq!(
            g.respond(true),
            Err(GameError::NoBackReference { index: 0, n: 2 })
        );
        assert_eq!(g.current_index(), 0);
        assert_eq!(g.back_reference(), None);
    }

    #[test]
    fn test_reveal_then_score() {
        let mut g = game(2, 5);
        g.start_with_sequence("ABACA".chars().collect());

        g.reveal_next().unwrap();
        g.reveal_next().unwrap();
        assert!(g.reveal_next().is_err());

        assert_eq!(g.current_symbol(), Some('A'));
        assert_eq!(g.back_reference(), Some('A'));

        assert_eq!(g.respond(true), Ok(Progress::Continue));
        assert_eq!(g.respond(false), Ok(Progress::Continue));
        let result = g.respond(true).unwrap().into_result().unwrap();

        assert_eq!(result.summary(), "3 / 3");
        assert_eq!(g.correct(), 3);
        assert_eq!(g.responses(), &[true, false, true]);
        assert_eq!(g.lifecycle(), Lifecycle::Finished);
    }

    #[test]
    fn test_wrong_claims_not_counted() {
        let mut g = game(1, 4);
        g.start_with_sequence("AABC".chars().collect());
        g.reveal_next().unwrap();

        g.respond(false).unwrap(); // A == A, wrong
        g.respond(true).unwrap(); // B != A, wrong
        let result = g.respond(false).unwrap().into_result().unwrap(); // C != B, right

        assert_eq!(result.summary(), "1 / 3");
    }

    #[test]
    fn test_respond_after_finish_rejected() {
        let mut g = game(1, 2);
        g.start_with_sequence("AB".chars().collect());
        g.reveal_next().unwrap();
        assert!(g.respond(false).unwrap().is_finished());

        assert!(matches!(
            g.respond(true),
            Err(GameError::InvalidTransition { .. })
        ));
        assert_eq!(g.responses().len(), 1);
    }

    #[test]
    fn test_short_sequence_finishes_immediately() {
        let mut g = game(2, 2);
        let progress = g.start(&mut GameRng::new(1));

        let result = progress.into_result().unwrap();
        assert_eq!(result.summary(), "0 / 0");
        assert_eq!(g.lifecycle(), Lifecycle::Finished);
    }

    #[test]
    fn test_random_sequence_uses_alphabet() {
        let config = NBackConfig::default()
            .with_sequence_length(40)
            .with_alphabet("XY".chars());
        let mut g = NBackGame::new(config, Arc::new(ManualClock::at_epoch())).unwrap();

        assert_eq!(g.start(&mut GameRng::new(5)), Progress::Continue);
        assert_eq!(g.sequence().len(), 40);
        assert!(g.sequence().iter().all(|c| *c == 'X' || *c == 'Y'));
        assert_eq!(g.scoreable_count(), 38);
        assert_eq!(g.progress(), (1, 40));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = game(2, 15);
        let mut b = game(2, 15);
        a.start(&mut GameRng::new(77));
        b.start(&mut GameRng::new(77));
        assert_eq!(a.sequence(), b.sequence());
    }
}
