//! Dashboard host: session routing and result collection.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::catalog::{result_row, GameInfo, ResultRow, CATALOG};
use crate::core::{ConfigError, GameRng, PlatformConfig, SharedClock, SystemClock};
use crate::games::hanoi::HanoiGame;
use crate::games::nback::NBackGame;
use crate::games::pal::PalGame;
use crate::games::stroop::{InkColor, StroopGame};
use crate::games::trail::TrailGame;
use crate::results::ResultsLog;
use crate::rules::{GameError, GameKind, GameResult, MiniGame, Progress};

/// A user action, as translated by the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameInput {
    /// Start (or restart) the session.
    Start,
    /// N-Back: move past a letter that has no back-reference yet.
    RevealNext,
    /// N-Back: match / no match.
    Respond(bool),
    /// Stroop: the ink color named.
    Guess(InkColor),
    /// PAL: done memorizing.
    AdvancePhase,
    /// PAL: typed answer.
    Submit(String),
    /// Hanoi: peg clicked.
    SelectPeg(usize),
    /// Hanoi: restore the starting arrangement.
    Reset,
    /// Trail-Making: target clicked.
    Click(u32),
}

impl GameInput {
    fn name(&self) -> &'static str {
        match self {
            GameInput::Start => "start",
            GameInput::RevealNext => "reveal_next",
            GameInput::Respond(_) => "respond",
            GameInput::Guess(_) => "guess",
            GameInput::AdvancePhase => "advance_phase",
            GameInput::Submit(_) => "submit",
            GameInput::SelectPeg(_) => "select_peg",
            GameInput::Reset => "reset",
            GameInput::Click(_) => "click",
        }
    }
}

/// The engine of the session in progress.
#[derive(Clone, Debug)]
pub enum ActiveGame {
    NBack(NBackGame),
    Stroop(StroopGame),
    Pal(PalGame),
    Hanoi(HanoiGame),
    Trail(TrailGame),
}

impl ActiveGame {
    fn build(kind: GameKind, config: &PlatformConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        Ok(match kind {
            GameKind::NBack => ActiveGame::NBack(NBackGame::new(config.nback.clone(), clock)?),
            GameKind::Stroop => ActiveGame::Stroop(StroopGame::new(config.stroop.clone(), clock)?),
            GameKind::Pal => ActiveGame::Pal(PalGame::new(config.pal.clone(), clock)?),
            GameKind::Hanoi => ActiveGame::Hanoi(HanoiGame::new(config.hanoi.clone(), clock)?),
            GameKind::TrailMaking => ActiveGame::Trail(TrailGame::new(config.trail.clone(), clock)?),
        })
    }

    /// The engine behind the shared trait.
    #[must_use]
    pub fn engine(&self) -> &dyn MiniGame {
        match self {
            ActiveGame::NBack(g) => g,
            ActiveGame::Stroop(g) => g,
            ActiveGame::Pal(g) => g,
            ActiveGame::Hanoi(g) => g,
            ActiveGame::Trail(g) => g,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn MiniGame {
        match self {
            ActiveGame::NBack(g) => g,
            ActiveGame::Stroop(g) => g,
            ActiveGame::Pal(g) => g,
            ActiveGame::Hanoi(g) => g,
            ActiveGame::Trail(g) => g,
        }
    }

    /// Which game is running.
    #[must_use]
    pub fn kind(&self) -> GameKind {
        self.engine().kind()
    }

    fn apply(&mut self, input: GameInput, rng: &mut GameRng) -> Result<Progress, GameError> {
        match (self, input) {
            (game, GameInput::Start) => Ok(game.engine_mut().start(rng)),
            (ActiveGame::NBack(g), GameInput::RevealNext) => g.reveal_next(),
            (ActiveGame::NBack(g), GameInput::Respond(is_match)) => g.respond(is_match),
            (ActiveGame::Stroop(g), GameInput::Guess(color)) => g.respond(color),
            (ActiveGame::Pal(g), GameInput::AdvancePhase) => g.advance_phase(),
            (ActiveGame::Pal(g), GameInput::Submit(answer)) => g.submit(&answer),
            (ActiveGame::Hanoi(g), GameInput::SelectPeg(index)) => g.select_peg(index),
            (ActiveGame::Hanoi(g), GameInput::Reset) => g.reset(),
            (ActiveGame::Trail(g), GameInput::Click(label)) => g.click(label),
            (game, input) => Err(GameError::UnsupportedInput {
                game: game.kind(),
                input: input.name(),
            }),
        }
    }
}

/// What the host is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Playing(GameKind),
}

/// One session: its engine and its private RNG stream.
#[derive(Debug)]
struct Session {
    game: ActiveGame,
    rng: GameRng,
    /// A finished result held back until its display delay has passed.
    pending: Option<(GameResult, DateTime<Utc>)>,
}

/// The dashboard host.
#[derive(Debug)]
pub struct Platform {
    config: PlatformConfig,
    clock: SharedClock,
    rng: GameRng,
    session: Option<Session>,
    results: ResultsLog,
}

impl Platform {
    /// Create a host showing the dashboard.
    pub fn new(config: PlatformConfig, clock: SharedClock) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Ok(Self {
            config,
            clock,
            rng,
            session: None,
            results: ResultsLog::new(),
        })
    }

    /// Create a host on the system clock.
    pub fn with_system_clock(config: PlatformConfig) -> Result<Self, ConfigError> {
        Self::new(config, SystemClock::shared())
    }

    /// Replace the results log, e.g. with a restored snapshot.
    #[must_use]
    pub fn with_results(mut self, results: ResultsLog) -> Self {
        self.results = results;
        self
    }

    /// Games offered on the dashboard.
    #[must_use]
    pub fn catalog(&self) -> &'static [GameInfo] {
        &CATALOG
    }

    /// Current view.
    #[must_use]
    pub fn view(&self) -> View {
        match &self.session {
            Some(session) => View::Playing(session.game.kind()),
            None => View::Dashboard,
        }
    }

    /// The session in progress.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveGame> {
        self.session.as_ref().map(|s| &s.game)
    }

    /// Open a fresh session of `kind`, abandoning any session in progress.
    pub fn select(&mut self, kind: GameKind) -> Result<(), ConfigError> {
        self.close_session();

        let game = ActiveGame::build(kind, &self.config, Arc::clone(&self.clock))?;
        let rng = self.rng.fork();
        info!(game = %kind, seed = rng.seed(), "game selected");

        self.session = Some(Session {
            game,
            rng,
            pending: None,
        });
        Ok(())
    }

    /// Return to the dashboard.
    ///
    /// An unfinished session is abandoned without a result. A result still
    /// waiting out its display delay is recorded now.
    pub fn back(&mut self) {
        self.close_session();
    }

    /// Route an input to the session in progress.
    ///
    /// Returns the result if this input completed the session and it was
    /// recorded immediately. Results with a display delay are recorded by
    /// `poll` once the delay has passed.
    pub fn handle(&mut self, input: GameInput) -> Option<GameResult> {
        let Some(session) = self.session.as_mut() else {
            debug!(input = input.name(), "input ignored on dashboard");
            return None;
        };
        if session.pending.is_some() {
            debug!(input = input.name(), "input ignored while result is pending");
            return None;
        }

        let result = match session.game.apply(input, &mut session.rng) {
            Ok(Progress::Continue) => return None,
            Ok(Progress::Finished(result)) => result,
            Err(err) => {
                debug!(game = %session.game.kind(), error = %err, "input rejected");
                return None;
            }
        };

        let delay = session.game.engine().result_delay();
        if delay > chrono::Duration::zero() {
            // A due time past the end of the calendar is recorded right away.
            if let Some(due) = self.clock.now().checked_add_signed(delay) {
                session.pending = Some((result, due));
                return None;
            }
        }

        self.record(result.clone());
        self.session = None;
        Some(result)
    }

    /// Record a pending result once its display delay has passed.
    pub fn poll(&mut self) -> Option<GameResult> {
        let due = self.session.as_ref()?.pending.as_ref()?.1;
        if self.clock.now() < due {
            return None;
        }

        let (result, _) = self.session.take()?.pending?;
        self.record(result.clone());
        Some(result)
    }

    fn close_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.pending {
            // Already earned: the delay only affects when it is shown.
            Some((result, _)) => self.record(result),
            None => info!(game = %session.game.kind(), "session abandoned"),
        }
    }

    fn record(&mut self, result: GameResult) {
        info!(
            game = %result.kind(),
            score = %result.summary(),
            total = self.results.len() + 1,
            "result recorded"
        );
        self.results.append(result);
    }

    /// Every recorded result.
    #[must_use]
    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    /// The dashboard's latest results, most recent first.
    #[must_use]
    pub fn recent_results(&self) -> Vec<&GameResult> {
        self.results.recent(self.config.recent_results.0).collect()
    }

    /// The dashboard's results table.
    #[must_use]
    pub fn result_rows(&self) -> Vec<ResultRow> {
        self.results
            .recent(self.config.recent_results.0)
            .map(result_row)
            .collect()
    }
}
