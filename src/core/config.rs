//! Game configuration types.
//!
//! Each engine is configured at construction by its own config struct:
//! - `NBackConfig`: alphabet, sequence length and back distance
//! - `StroopConfig`: color set, trial count, congruence probability
//! - `PalConfig`: word-pair pool and how many pairs to test
//! - `HanoiConfig`: disk and peg counts, result display delay
//! - `TrailConfig`: item count and grid dimensions
//! - `PlatformConfig`: combines all of the above for the host
//!
//! Defaults reproduce the platform's standard test battery.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::games::pal::WordPair;
use crate::games::stroop::InkColor;

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The N-Back alphabet has no symbols.
    #[error("n-back alphabet is empty")]
    EmptyAlphabet,

    /// The Stroop color set has no colors.
    #[error("stroop color set is empty")]
    EmptyColorSet,

    /// A probability outside `[0, 1]`.
    #[error("congruent probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// More pairs requested than the pool holds.
    #[error("cannot draw {requested} pairs from a pool of {available}")]
    NotEnoughPairs { requested: usize, available: usize },

    /// The same cue appears twice in the pool.
    #[error("duplicate cue in pair pool: {0}")]
    DuplicatePair(String),

    /// Tower of Hanoi needs at least one disk.
    #[error("tower of hanoi needs at least one disk")]
    NoDisks,

    /// More disks than a tower can label and count.
    #[error("tower of hanoi supports at most {max} disks, got {disks}")]
    TooManyDisks { disks: usize, max: usize },

    /// Result display delay longer than the host will hold a result.
    #[error("result delay of {millis} ms exceeds the {max} ms limit")]
    DelayTooLong { millis: u64, max: u64 },

    /// Tower of Hanoi needs at least three pegs.
    #[error("tower of hanoi needs at least 3 pegs, got {0}")]
    TooFewPegs(usize),

    /// Grid with more cells than targets can be sampled from.
    #[error("a {rows}x{cols} grid is too large")]
    GridTooLarge { rows: usize, cols: usize },

    /// More trail items than grid cells.
    #[error("cannot place {items} items on a {rows}x{cols} grid")]
    GridTooSmall { items: usize, rows: usize, cols: usize },

    /// Malformed JSON.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// N-Back configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NBackConfig {
    /// Back distance (2 = "2-back").
    pub n: usize,

    /// Number of symbols shown per session.
    pub sequence_length: usize,

    /// Symbols drawn uniformly, with replacement.
    pub alphabet: Vec<char>,
}

impl Default for NBackConfig {
    fn default() -> Self {
        Self {
            n: 2,
            sequence_length: 15,
            alphabet: "ABCDEFGHJKLMNPQRTUVWXYZ".chars().collect(),
        }
    }
}

impl NBackConfig {
    /// Set the back distance.
    #[must_use]
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the sequence length.
    #[must_use]
    pub fn with_sequence_length(mut self, len: usize) -> Self {
        self.sequence_length = len;
        self
    }

    /// Set the symbol alphabet.
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: impl IntoIterator<Item = char>) -> Self {
        self.alphabet = alphabet.into_iter().collect();
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alphabet.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(())
    }
}

/// Stroop configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StroopConfig {
    /// Number of trials per session.
    pub trial_count: usize,

    /// Colors used both as words and as ink.
    pub colors: Vec<InkColor>,

    /// Probability that a trial is forced congruent.
    pub congruent_probability: f64,
}

impl Default for StroopConfig {
    fn default() -> Self {
        Self {
            trial_count: 12,
            colors: InkColor::ALL.to_vec(),
            congruent_probability: 0.4,
        }
    }
}

impl StroopConfig {
    /// Set the trial count.
    #[must_use]
    pub fn with_trial_count(mut self, count: usize) -> Self {
        self.trial_count = count;
        self
    }

    /// Set the congruence probability.
    #[must_use]
    pub fn with_congruent_probability(mut self, p: f64) -> Self {
        self.congruent_probability = p;
        self
    }

    /// Set the color set.
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<InkColor>) -> Self {
        self.colors = colors;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyColorSet);
        }
        if !(0.0..=1.0).contains(&self.congruent_probability) {
            return Err(ConfigError::InvalidProbability(self.congruent_probability));
        }
        Ok(())
    }
}

/// Paired-associate learning configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PalConfig {
    /// Pairs tested per session.
    pub pair_count: usize,

    /// Pool the session's pairs are drawn from.
    pub pool: Vec<WordPair>,
}

impl Default for PalConfig {
    fn default() -> Self {
        let pool = [
            ("cat", "moon"),
            ("pen", "star"),
            ("cake", "tree"),
            ("book", "fish"),
            ("car", "shoe"),
            ("apple", "chair"),
        ]
        .into_iter()
        .map(|(cue, target)| WordPair::new(cue, target))
        .collect();

        Self { pair_count: 4, pool }
    }
}

impl PalConfig {
    /// Set the number of pairs tested.
    #[must_use]
    pub fn with_pair_count(mut self, count: usize) -> Self {
        self.pair_count = count;
        self
    }

    /// Replace the pair pool.
    #[must_use]
    pub fn with_pool(mut self, pool: Vec<WordPair>) -> Self {
        self.pool = pool;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count > self.pool.len() {
            return Err(ConfigError::NotEnoughPairs {
                requested: self.pair_count,
                available: self.pool.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for pair in &self.pool {
            if !seen.insert(pair.cue.to_lowercase()) {
                return Err(ConfigError::DuplicatePair(pair.cue.clone()));
            }
        }
        Ok(())
    }
}

/// Tower of Hanoi configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HanoiConfig {
    /// Number of disks, all starting on the first peg.
    pub disks: usize,

    /// Number of pegs; the goal is the last one.
    pub pegs: usize,

    /// How long the host shows the solved puzzle before recording the result.
    pub result_delay_ms: u64,
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            disks: 3,
            pegs: 3,
            result_delay_ms: 500,
        }
    }
}

impl HanoiConfig {
    /// Largest supported tower; keeps `2^disks - 1` within `u64`.
    pub const MAX_DISKS: usize = 63;

    /// Longest result display delay: one day.
    pub const MAX_RESULT_DELAY_MS: u64 = 86_400_000;

    /// Set the disk count.
    #[must_use]
    pub fn with_disks(mut self, disks: usize) -> Self {
        self.disks = disks;
        self
    }

    /// Set the peg count.
    #[must_use]
    pub fn with_pegs(mut self, pegs: usize) -> Self {
        self.pegs = pegs;
        self
    }

    /// Set the result display delay.
    #[must_use]
    pub fn with_result_delay_ms(mut self, millis: u64) -> Self {
        self.result_delay_ms = millis;
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disks == 0 {
            return Err(ConfigError::NoDisks);
        }
        if self.disks > Self::MAX_DISKS {
            return Err(ConfigError::TooManyDisks {
                disks: self.disks,
                max: Self::MAX_DISKS,
            });
        }
        if self.result_delay_ms > Self::MAX_RESULT_DELAY_MS {
            return Err(ConfigError::DelayTooLong {
                millis: self.result_delay_ms,
                max: Self::MAX_RESULT_DELAY_MS,
            });
        }
        if self.pegs < 3 {
            return Err(ConfigError::TooFewPegs(self.pegs));
        }
        Ok(())
    }
}

/// Trail-making configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Targets labelled `1..=item_count`.
    pub item_count: usize,

    /// Grid rows.
    pub rows: usize,

    /// Grid columns.
    pub cols: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            item_count: 12,
            rows: 5,
            cols: 4,
        }
    }
}

impl TrailConfig {
    /// Set the item count.
    #[must_use]
    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = count;
        self
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Number of grid cells.
    ///
    /// Grids whose cell count overflows or exceeds `u32::MAX` are rejected,
    /// since target labels are `u32`.
    pub fn cell_count(&self) -> Result<usize, ConfigError> {
        self.rows
            .checked_mul(self.cols)
            .filter(|&cells| u32::try_from(cells).is_ok())
            .ok_or(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count > self.cell_count()? {
            return Err(ConfigError::GridTooSmall {
                items: self.item_count,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

/// Host configuration: every game plus dashboard settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Fixed seed for reproducible sessions. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// How many results the dashboard lists.
    pub recent_results: RecentResults,

    pub nback: NBackConfig,
    pub stroop: StroopConfig,
    pub pal: PalConfig,
    pub hanoi: HanoiConfig,
    pub trail: TrailConfig,
}

/// Dashboard result-list cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentResults(pub usize);

impl Default for RecentResults {
    fn default() -> Self {
        Self(5)
    }
}

impl PlatformConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every game's configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nback.validate()?;
        self.stroop.validate()?;
        self.pal.validate()?;
        self.hanoi.validate()?;
        self.trail.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlatformConfig::default();
        assert_eq!(config.nback.n, 2);
        assert_eq!(config.nback.sequence_length, 15);
        assert_eq!(config.nback.alphabet.len(), 23);
        assert_eq!(config.stroop.trial_count, 12);
        assert_eq!(config.stroop.colors.len(), 5);
        assert_eq!(config.pal.pair_count, 4);
        assert_eq!(config.pal.pool.len(), 6);
        assert_eq!(config.hanoi.disks, 3);
        assert_eq!(config.hanoi.result_delay_ms, 500);
        assert_eq!((config.trail.rows, config.trail.cols), (5, 4));
        assert_eq!(config.recent_results.0, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let nback = NBackConfig::default()
            .with_n(3)
            .with_sequence_length(20)
            .with_alphabet("XYZ".chars());

        assert_eq!(nback.n, 3);
        assert_eq!(nback.sequence_length, 20);
        assert_eq!(nback.alphabet, vec!['X', 'Y', 'Z']);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            NBackConfig::default().with_alphabet(Vec::new()).validate(),
            Err(ConfigError::EmptyAlphabet)
        ));
        assert!(matches!(
            StroopConfig::default().with_congruent_probability(1.5).validate(),
            Err(ConfigError::InvalidProbability(_))
        ));
        assert!(matches!(
            StroopConfig::default().with_colors(vec![]).validate(),
            Err(ConfigError::EmptyColorSet)
        ));
        assert!(matches!(
            PalConfig::default().with_pair_count(7).validate(),
            Err(ConfigError::NotEnoughPairs { requested: 7, available: 6 })
        ));
        assert!(matches!(
            HanoiConfig::default().with_disks(0).validate(),
            Err(ConfigError::NoDisks)
        ));
        assert!(matches!(
            HanoiConfig::default().with_pegs(2).validate(),
            Err(ConfigError::TooFewPegs(2))
        ));
        assert!(matches!(
            HanoiConfig::default().with_disks(64).validate(),
            Err(ConfigError::TooManyDisks { disks: 64, max: 63 })
        ));
        assert!(matches!(
            HanoiConfig::default().with_result_delay_ms(86_400_001).validate(),
            Err(ConfigError::DelayTooLong { millis: 86_400_001, .. })
        ));
        assert!(HanoiConfig::default()
            .with_disks(63)
            .with_result_delay_ms(86_400_000)
            .validate()
            .is_ok());
        assert!(matches!(
            TrailConfig::default().with_grid(3, 3).validate(),
            Err(ConfigError::GridTooSmall { items: 12, rows: 3, cols: 3 })
        ));
    }

    #[test]
    fn test_duplicate_cues_rejected() {
        let config = PalConfig::default().with_pool(vec![
            WordPair::new("cat", "moon"),
            WordPair::new("Cat", "sun"),
        ]);
        assert!(matches!(config.validate(), Err(ConfigError::DuplicatePair(_))));
    }

    #[test]
    fn test_from_json_partial() {
        let config = PlatformConfig::from_json(
            r#"{ "seed": 9, "recent_results": 3, "nback": { "n": 3 }, "hanoi": { "disks": 4 } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.recent_results.0, 3);
        assert_eq!(config.nback.n, 3);
        assert_eq!(config.nback.sequence_length, 15);
        assert_eq!(config.hanoi.disks, 4);
        assert_eq!(config.hanoi.pegs, 3);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            PlatformConfig::from_json(r#"{ "trail": { "item_count": 30 } }"#),
            Err(ConfigError::GridTooSmall { .. })
        ));
        assert!(matches!(
            PlatformConfig::from_json(r#"{ "trail": { "rows": 18446744073709551615, "cols": 2 } }"#),
            Err(ConfigError::GridTooLarge { cols: 2, .. })
        ));
        assert!(matches!(
            PlatformConfig::from_json(r#"{ "trail": { "rows": 65536, "cols": 65536 } }"#),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert!(matches!(
            PlatformConfig::from_json(r#"{ "hanoi": { "result_delay_ms": 18446744073709551615 } }"#),
            Err(ConfigError::DelayTooLong { .. })
        ));
        assert!(matches!(
            PlatformConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = PlatformConfig::default().with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PlatformConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
