//! Static configuration consumed by the match engine.

use serde::Deserialize;
use thiserror::Error;
use word_slasher_core::Tier;

/// Words handed to basic enemies when no configuration overrides them.
pub const DEFAULT_BASIC_WORDS: [&str; 10] = [
    "phaser",
    "javascript",
    "typing",
    "game",
    "enemy",
    "crystal",
    "score",
    "health",
    "speed",
    "word",
];

/// Words handed to hard enemies when no configuration overrides them.
pub const DEFAULT_HARD_WORDS: [&str; 8] = [
    "programming",
    "development",
    "application",
    "interactive",
    "challenging",
    "difficulty",
    "experience",
    "performance",
];

const DEFAULT_OBJECTIVE_THRESHOLD: f32 = 1260.0;
const DEFAULT_MAX_HEALTH: u32 = 100;
const DEFAULT_SEED: u64 = 0x5eed_0f_c4f5_7a11;

/// Inclusive range an enemy's speed is drawn from, in units per second.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SpeedRange {
    min: f32,
    max: f32,
}

impl SpeedRange {
    /// Creates a new speed range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Creates a degenerate range that always yields `speed`.
    #[must_use]
    pub const fn fixed(speed: f32) -> Self {
        Self::new(speed, speed)
    }

    /// Slowest speed that may be drawn.
    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    /// Fastest speed that may be drawn.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min > 0.0 && self.min <= self.max
    }
}

/// Word list and movement tuning of a single difficulty tier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    /// Candidate words, lowercase ASCII letters only.
    pub words: Vec<String>,
    /// Range enemy speeds are drawn from.
    pub speed: SpeedRange,
}

impl TierConfig {
    fn from_words(words: &[&str], speed: SpeedRange) -> Self {
        Self {
            words: words.iter().map(|word| (*word).to_owned()).collect(),
            speed,
        }
    }
}

/// Complete configuration of a match.
///
/// Missing fields fall back to [`MatchConfig::default`]: sprite speeds of 1-3
/// and 4-5 pixels per frame at 60 fps, expressed as 60-180 and 240-300 units
/// per second.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Tuning of basic enemies.
    pub basic: TierConfig,
    /// Tuning of hard enemies.
    pub hard: TierConfig,
    /// Lane progress assigned to freshly spawned enemies.
    pub start_position: f32,
    /// Enemies whose progress exceeds this value reach the objective.
    pub objective_threshold: f32,
    /// Health the objective starts with.
    pub max_health: u32,
    /// Seed for word draws and speed rolls.
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            basic: TierConfig::from_words(&DEFAULT_BASIC_WORDS, SpeedRange::new(60.0, 180.0)),
            hard: TierConfig::from_words(&DEFAULT_HARD_WORDS, SpeedRange::new(240.0, 300.0)),
            start_position: 0.0,
            objective_threshold: DEFAULT_OBJECTIVE_THRESHOLD,
            max_health: DEFAULT_MAX_HEALTH,
            seed: DEFAULT_SEED,
        }
    }
}

impl MatchConfig {
    /// Returns the configuration of the provided tier.
    #[must_use]
    pub fn tier(&self, tier: Tier) -> &TierConfig {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Hard => &self.hard,
        }
    }

    /// Checks the numeric tuning of the configuration.
    ///
    /// Word lists are validated by [`crate::WordPool::new`], which owns the
    /// invariants they feed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in Tier::ALL {
            let speed = self.tier(tier).speed;
            if !speed.is_valid() {
                return Err(ConfigError::InvalidSpeedRange {
                    tier,
                    min: speed.min(),
                    max: speed.max(),
                });
            }
        }

        let travel = self.objective_threshold - self.start_position;
        if !travel.is_finite() || travel <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                start: self.start_position,
                threshold: self.objective_threshold,
            });
        }

        if self.max_health == 0 {
            return Err(ConfigError::InvalidMaxHealth);
        }

        Ok(())
    }
}

/// Reasons a configuration is rejected at construction time.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A tier has no candidate words.
    #[error("word list for tier `{}` is empty", .tier.name())]
    EmptyTier {
        /// Tier with the empty list.
        tier: Tier,
    },
    /// A tier contains an empty string.
    #[error("word list for tier `{}` contains an empty word", .tier.name())]
    EmptyWord {
        /// Tier containing the empty word.
        tier: Tier,
    },
    /// A word contains characters that cannot be typed.
    #[error("word `{word}` in tier `{}` must contain only lowercase ascii letters", .tier.name())]
    InvalidWord {
        /// Tier containing the word.
        tier: Tier,
        /// Offending word.
        word: String,
    },
    /// A word appears more than once across all tiers.
    #[error("word `{word}` is listed more than once")]
    DuplicateWord {
        /// Offending word.
        word: String,
    },
    /// A speed range is empty, non-positive or not finite.
    #[error("speed range {min}..={max} for tier `{}` is invalid", .tier.name())]
    InvalidSpeedRange {
        /// Tier with the invalid range.
        tier: Tier,
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },
    /// The objective threshold does not lie ahead of the start position.
    #[error("objective threshold {threshold} must lie beyond start position {start}")]
    InvalidThreshold {
        /// Configured start position.
        start: f32,
        /// Configured objective threshold.
        threshold: f32,
    },
    /// The objective would start destroyed.
    #[error("maximum health must be positive")]
    InvalidMaxHealth,
}
