//! Tower of Hanoi engine implementation.

use chrono::Duration;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::core::{ConfigError, GameRng, HanoiConfig, SharedClock};
use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

/// Disk sizes from bottom to top, strictly decreasing.
/// SmallVec keeps typical towers (< 8 disks) off the heap.
pub type Peg = SmallVec<[u32; 8]>;

/// Tower of Hanoi session state.
#[derive(Clone, Debug)]
pub struct HanoiGame {
    config: HanoiConfig,
    clock: SharedClock,
    pegs: Vec<Peg>,
    selected: Option<usize>,
    move_count: u32,
    result: Option<GameResult>,
}

impl HanoiGame {
    /// Create an engine with the puzzle already laid out and running.
    pub fn new(config: HanoiConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self {
            config,
            clock,
            pegs: Vec::new(),
            selected: None,
            move_count: 0,
            result: None,
        };
        game.lay_out();
        Ok(game)
    }

    fn lay_out(&mut self) {
        // Bounded by `HanoiConfig::MAX_DISKS`.
        let disks = u32::try_from(self.config.disks).unwrap_or(u32::MAX);
        self.pegs = vec![Peg::new(); self.config.pegs];
        self.pegs[0].extend((1..=disks).rev());
        self.selected = None;
        self.move_count = 0;
        self.result = None;
    }

    /// Restore the starting arrangement and zero the move count.
    pub fn reset(&mut self) -> Result<Progress, GameError> {
        self.ensure_running("reset")?;
        self.lay_out();
        debug!(game = %GameKind::Hanoi, "puzzle reset");
        Ok(Progress::Continue)
    }

    /// Select a peg.
    ///
    /// With nothing selected this picks the source peg. With a source already
    /// selected it attempts to move the source's top disk onto this peg; the
    /// selection is cleared whether or not the move succeeds, including when
    /// the destination does not exist.
    pub fn select_peg(&mut self, index: usize) -> Result<Progress, GameError> {
        self.ensure_running("select_peg")?;

        match self.selected.take() {
            None => {
                self.check_peg(index)?;
                self.selected = Some(index);
                Ok(Progress::Continue)
            }
            Some(from) => {
                self.check_peg(index)?;
                self.attempt_move(from, index)
            }
        }
    }

    /// Move the top disk of `from` onto `to` directly, discarding any selection.
    pub fn move_disk(&mut self, from: usize, to: usize) -> Result<Progress, GameError> {
        self.ensure_running("move_disk")?;
        self.check_peg(from)?;
        self.check_peg(to)?;
        self.selected = None;
        self.attempt_move(from, to)
    }

    fn check_peg(&self, index: usize) -> Result<(), GameError> {
        if index >= self.pegs.len() {
            return Err(GameError::NoSuchPeg {
                index,
                pegs: self.pegs.len(),
            });
        }
        Ok(())
    }

    fn attempt_move(&mut self, from: usize, to: usize) -> Result<Progress, GameError> {
        if !self.is_legal(from, to) {
            debug!(game = %GameKind::Hanoi, from, to, "illegal move rejected");
            return Err(GameError::IllegalMove { from, to });
        }

        if let Some(disk) = self.pegs[from].pop() {
            self.pegs[to].push(disk);
            self.move_count += 1;
            trace!(game = %GameKind::Hanoi, disk, from, to, moves = self.move_count, "disk moved");
        }

        if self.is_solved() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    /// Check the stacking rule for a move.
    #[must_use]
    pub fn is_legal(&self, from: usize, to: usize) -> bool {
        if from == to {
            return false;
        }
        let (Some(source), Some(dest)) = (self.pegs.get(from), self.pegs.get(to)) else {
            return false;
        };
        match (source.last(), dest.last()) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(disk), Some(top)) => disk < top,
        }
    }

    /// Every disk is on the last peg.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.pegs
            .last()
            .is_some_and(|goal| goal.len() == self.config.disks)
    }

    fn finish(&mut self) -> Progress {
        let result = GameResult::new(
            GameKind::Hanoi,
            Score::Moves(self.move_count),
            self.clock.now(),
        );

        info!(game = %GameKind::Hanoi, score = %result.summary(), "puzzle solved");

        self.result = Some(result.clone());
        Progress::Finished(result)
    }

    /// Moves of the minimal solution for `disks` disks on three pegs,
    /// from peg 0 to peg 2.
    #[must_use]
    pub fn canonical_solution(disks: usize) -> Vec<(usize, usize)> {
        fn solve(n: usize, from: usize, to: usize, via: usize, out: &mut Vec<(usize, usize)>) {
            if n == 0 {
                return;
            }
            solve(n - 1, from, via, to, out);
            out.push((from, to));
            solve(n - 1, via, to, from, out);
        }

        let mut moves = Vec::new();
        solve(disks, 0, 2, 1, &mut moves);
        moves
    }

    // === Views ===

    /// Pegs, bottom disk first.
    #[must_use]
    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    /// The selected source peg, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Legal moves made so far.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Total disks on all pegs.
    #[must_use]
    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(|peg| peg.len()).sum()
    }

    /// Fewest moves that solve the puzzle on three pegs: 2^n - 1.
    #[must_use]
    pub fn minimum_moves(&self) -> u64 {
        (1u64 << self.config.disks) - 1
    }
}

impl MiniGame for HanoiGame {
    fn kind(&self) -> GameKind {
        GameKind::Hanoi
    }

    fn lifecycle(&self) -> Lifecycle {
        if self.result.is_some() {
            Lifecycle::Finished
        } else {
            Lifecycle::Running
        }
    }

    /// The puzzle has no random content; starting lays it out afresh.
    fn start(&mut self, _rng: &mut GameRng) -> Progress {
        self.lay_out();
        info!(game = %GameKind::Hanoi, disks = self.config.disks, pegs = self.config.pegs, "session started");
        Progress::Continue
    }

    fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    fn result_delay(&self) -> Duration {
        Duration::milliseconds(i64::try_from(self.config.result_delay_ms).unwrap_or(i64::MAX))
    }
}
