//! Append-only log of finished sessions.

use im::Vector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::GameResult;

/// Snapshot encode/decode failure.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("results snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Insertion-ordered results.
///
/// Uses an `im` vector so hosts can hand out cheap copies of the whole log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsLog {
    entries: Vector<GameResult>,
}

impl ResultsLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished result. The only mutator.
    pub fn append(&mut self, result: GameResult) {
        self.entries.push_back(result);
    }

    /// The last `k` results, most recent first.
    pub fn recent(&self, k: usize) -> impl Iterator<Item = &GameResult> {
        self.entries.iter().rev().take(k)
    }

    /// The latest result.
    #[must_use]
    pub fn latest(&self) -> Option<&GameResult> {
        self.entries.last()
    }

    /// All results, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &GameResult> {
        self.entries.iter()
    }

    /// Number of results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no result has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the log as a compact binary snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a log from a snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Extend<GameResult> for ResultsLog {
    fn extend<I: IntoIterator<Item = GameResult>>(&mut self, iter: I) {
        for result in iter {
            self.append(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GameKind, Score};
    use chrono::{DateTime, Duration, Utc};

    fn result(moves: u32) -> GameResult {
        let at = DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(i64::from(moves));
        GameResult::new(GameKind::Hanoi, Score::Moves(moves), at)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ResultsLog::new();
        assert!(log.is_empty());
        assert!(log.latest().is_none());

        log.extend((1..=3).map(result));

        assert_eq!(log.len(), 3);
        let moves: Vec<_> = log.iter().map(GameResult::summary).collect();
        assert_eq!(moves, vec!["1 moves", "2 moves", "3 moves"]);
        assert_eq!(log.latest(), Some(&result(3)));
    }

    #[test]
    fn test_recent_is_reverse_chronological() {
        let mut log = ResultsLog::new();
        log.extend((1..=7).map(result));

        let recent: Vec<_> = log.recent(5).map(GameResult::summary).collect();
        assert_eq!(
            recent,
            vec!["7 moves", "6 moves", "5 moves", "4 moves", "3 moves"]
        );

        // Reading does not disturb the log
        assert_eq!(log.len(), 7);
        assert_eq!(log.iter().next(), Some(&result(1)));
    }

    #[test]
    fn test_recent_larger_than_log() {
        let mut log = ResultsLog::new();
        log.append(result(1));
        assert_eq!(log.recent(5).count(), 1);
        assert_eq!(log.recent(0).count(), 0);
    }

    #[test]
    fn test_snapshot_restores_log() {
        let mut log = ResultsLog::new();
        log.extend((1..=3).map(result));

        let bytes = log.to_bytes().unwrap();
        let restored = ResultsLog::from_bytes(&bytes).unwrap();
        assert_eq!(restored, log);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        assert!(ResultsLog::from_bytes(&[0xff, 0x01]).is_err());
    }
}
