//! Game catalog and dashboard rows.

use serde::Serialize;

use crate::rules::{GameKind, GameResult};

/// Dashboard entry for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GameInfo {
    pub kind: GameKind,
    pub description: &'static str,
}

impl GameInfo {
    /// Short stable identifier.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Every game, in dashboard order.
pub const CATALOG: [GameInfo; 5] = [
    GameInfo {
        kind: GameKind::NBack,
        description: "Test your working memory by identifying if the current letter matches the one N steps back.",
    },
    GameInfo {
        kind: GameKind::Stroop,
        description: "Name the color of the word, not the word itself. Tests cognitive flexibility and attention.",
    },
    GameInfo {
        kind: GameKind::Pal,
        description: "Memorize word pairs and recall them when prompted.",
    },
    GameInfo {
        kind: GameKind::Hanoi,
        description: "Solve the puzzle by moving disks between pegs, following the rules.",
    },
    GameInfo {
        kind: GameKind::TrailMaking,
        description: "Click scattered numbers in order as quickly as possible.",
    },
];

/// Catalog entry for a game.
#[must_use]
pub fn describe(kind: GameKind) -> &'static GameInfo {
    match kind {
        GameKind::NBack => &CATALOG[0],
        GameKind::Stroop => &CATALOG[1],
        GameKind::Pal => &CATALOG[2],
        GameKind::Hanoi => &CATALOG[3],
        GameKind::TrailMaking => &CATALOG[4],
    }
}

/// One row of the dashboard's results table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub game: &'static str,
    pub score: String,
    pub date: String,
}

/// Render a result as a dashboard row.
#[must_use]
pub fn result_row(result: &GameResult) -> ResultRow {
    ResultRow {
        game: result.kind().name(),
        score: result.summary(),
        date: result.timestamp_iso(),
    }
}
