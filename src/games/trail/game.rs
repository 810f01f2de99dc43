//! Trail-Making engine implementation.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::core::{elapsed_ms, ConfigError, GameRng, SharedClock, TrailConfig};
use crate::rules::{GameError, GameKind, GameResult, Lifecycle, MiniGame, Progress, Score};

/// A grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// Create a cell.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A numbered target and where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub label: u32,
    pub cell: Cell,
}

/// Trail-Making session state.
#[derive(Clone, Debug)]
pub struct TrailGame {
    config: TrailConfig,
    /// `rows * cols`, checked at construction.
    cells: usize,
    clock: SharedClock,
    lifecycle: Lifecycle,
    targets: Vec<Target>,
    by_cell: FxHashMap<Cell, u32>,
    /// Advances only on a click of exactly this label.
    next_expected: u32,
    started_at: DateTime<Utc>,
    clicks: Vec<DateTime<Utc>>,
    result: Option<GameResult>,
}

impl TrailGame {
    /// Create an idle engine.
    pub fn new(config: TrailConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let cells = config.cell_count()?;
        let started_at = clock.now();
        Ok(Self {
            config,
            cells,
            clock,
            lifecycle: Lifecycle::Idle,
            targets: Vec::new(),
            by_cell: FxHashMap::default(),
            next_expected: 1,
            started_at,
            clicks: Vec::new(),
            result: None,
        })
    }

    /// Start a session with fixed target positions.
    ///
    /// Targets should carry labels `1..=len` at distinct cells.
    pub fn start_with_targets(&mut self, targets: Vec<Target>) -> Progress {
        self.by_cell = targets.iter().map(|t| (t.cell, t.label)).collect();
        self.targets = targets;
        self.next_expected = 1;
        self.clicks.clear();
        self.started_at = self.clock.now();
        self.result = None;
        self.lifecycle = Lifecycle::Running;

        info!(game = %GameKind::TrailMaking, items = self.targets.len(), "session started");

        if self.targets.is_empty() {
            return self.finish();
        }
        Progress::Continue
    }

    /// Click the target with this label.
    pub fn click(&mut self, label: u32) -> Result<Progress, GameError> {
        self.ensure_running("click")?;

        if label != self.next_expected {
            debug!(
                game = %GameKind::TrailMaking,
                expected = self.next_expected,
                clicked = label,
                "out-of-order click ignored"
            );
            return Err(GameError::OutOfOrder {
                expected: self.next_expected,
                clicked: label,
            });
        }

        self.clicks.push(self.clock.now());
        self.next_expected += 1;
        trace!(game = %GameKind::TrailMaking, label, "target reached");

        if self.next_expected as usize > self.targets.len() {
            return Ok(self.finish());
        }
        Ok(Progress::Continue)
    }

    fn finish(&mut self) -> Progress {
        let end = self.clicks.last().copied().unwrap_or(self.started_at);
        let result = GameResult::new(
            GameKind::TrailMaking,
            Score::Elapsed {
                millis: elapsed_ms(self.started_at, end),
            },
            self.clock.now(),
        );

        info!(game = %GameKind::TrailMaking, score = %result.summary(), "session finished");

        self.lifecycle = Lifecycle::Finished;
        self.result = Some(result.clone());
        Progress::Finished(result)
    }

    // === Views ===

    /// All targets, in label order.
    #[must_use]
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Targets not yet reached.
    pub fn remaining(&self) -> impl Iterator<Item = &Target> {
        let next = self.next_expected;
        self.targets.iter().filter(move |t| t.label >= next)
    }

    /// Label placed at a cell, if any.
    #[must_use]
    pub fn target_at(&self, cell: Cell) -> Option<u32> {
        self.by_cell.get(&cell).copied()
    }

    /// The label that must be clicked next.
    #[must_use]
    pub fn next_expected(&self) -> u32 {
        self.next_expected
    }

    /// Times of accepted clicks.
    #[must_use]
    pub fn click_times(&self) -> &[DateTime<Utc>] {
        &self.clicks
    }

    /// Targets reached and total targets.
    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        (self.clicks.len(), self.targets.len())
    }

    /// Grid dimensions as `(rows, cols)`.
    #[must_use]
    pub fn grid(&self) -> (usize, usize) {
        (self.config.rows, self.config.cols)
    }
}

impl MiniGame for TrailGame {
    fn kind(&self) -> GameKind {
        GameKind::TrailMaking
    }

    fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn start(&mut self, rng: &mut GameRng) -> Progress {
        let TrailConfig {
            item_count, cols, ..
        } = self.config;

        let targets = rng
            .sample_indices(self.cells, item_count)
            .into_iter()
            .zip(1u32..)
            .map(|(index, label)| Target {
                label,
                cell: Cell::new(index / cols, index % cols),
            })
            .collect();
        self.start_with_targets(targets)
    }

    fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }
}
