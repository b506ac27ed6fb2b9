//! Word assignment with duplicate prevention.

use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use word_slasher_core::Tier;

use crate::config::ConfigError;

/// Supplies words to spawning enemies so that no two live enemies share one.
///
/// Reservations are counted per word and shared by every tier. A draw always
/// picks among the tier's least-reserved words, so an unused word is handed
/// out whenever one exists; once every word of a tier is live, the least
/// duplicated ones are reused and spawns never starve.
#[derive(Debug)]
pub struct WordPool {
    basic: Vec<String>,
    hard: Vec<String>,
    active: HashMap<String, usize>,
    rng: ChaCha8Rng,
}

impl WordPool {
    /// Creates a pool after validating both word lists.
    ///
    /// Every tier must be non-empty, every word must consist of lowercase ASCII
    /// letters, and no word may appear twice across tiers.
    pub fn new(basic: Vec<String>, hard: Vec<String>, seed: u64) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        validate_tier(Tier::Basic, &basic, &mut seen)?;
        validate_tier(Tier::Hard, &hard, &mut seen)?;

        Ok(Self {
            basic,
            hard,
            active: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Candidate words of the provided tier.
    #[must_use]
    pub fn words(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Basic => &self.basic,
            Tier::Hard => &self.hard,
        }
    }

    /// Draws an unused word of the provided tier and reserves it.
    ///
    /// When every word of the tier is live, one of the least-reserved words is
    /// reused instead.
    pub fn draw_word(&mut self, tier: Tier) -> String {
        let words = match tier {
            Tier::Basic => &self.basic,
            Tier::Hard => &self.hard,
        };

        let fewest = words
            .iter()
            .map(|word| self.reservations(word))
            .min()
            .unwrap_or(0);
        if fewest > 0 {
            debug!(tier = tier.name(), fewest, "every word active; reusing tier");
        }

        let available: Vec<&String> = words
            .iter()
            .filter(|word| self.reservations(word) == fewest)
            .collect();
        debug_assert!(!available.is_empty(), "word tiers are validated non-empty");

        let index = self.rng.gen_range(0..available.len());
        let word = available[index].clone();
        *self.active.entry(word.clone()).or_insert(0) += 1;
        word
    }

    /// Drops one reservation of `word`; it becomes eligible for reassignment
    /// once no live enemy carries it.
    pub fn release(&mut self, word: &str) {
        let Some(count) = self.active.get_mut(word) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            let _ = self.active.remove(word);
        }
    }

    /// Releases every reserved word.
    pub fn release_all(&mut self) {
        self.active.clear();
    }

    /// Reports whether `word` is currently assigned to a live enemy.
    #[must_use]
    pub fn is_active(&self, word: &str) -> bool {
        self.active.contains_key(word)
    }

    /// Number of live enemies currently carrying `word`.
    #[must_use]
    pub fn reservations(&self, word: &str) -> usize {
        self.active.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words currently reserved across all tiers.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Releases every word and rewinds the random stream to `seed`.
    pub(crate) fn reset(&mut self, seed: u64) {
        self.release_all();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

fn validate_tier(
    tier: Tier,
    words: &[String],
    seen: &mut HashSet<String>,
) -> Result<(), ConfigError> {
    if words.is_empty() {
        return Err(ConfigError::EmptyTier { tier });
    }

    for word in words {
        if word.is_empty() {
            return Err(ConfigError::EmptyWord { tier });
        }
        if !word.bytes().all(|byte| byte.is_ascii_lowercase()) {
            return Err(ConfigError::InvalidWord {
                tier,
                word: word.clone(),
            });
        }
        if !seen.insert(word.clone()) {
            return Err(ConfigError::DuplicateWord { word: word.clone() });
        }
    }

    Ok(())
}
