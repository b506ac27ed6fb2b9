//! Keystroke matching against the words of live enemies.

use word_slasher_core::{EnemyId, Glyph, Tier};

use crate::director::Enemy;

/// Result of feeding a single character to the [`TypingMatcher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// The buffer still prefixes at least one live word.
    Extended,
    /// No live word continues with the character; the buffer was cleared.
    Mismatch,
    /// The buffer spelled a complete word; the buffer was cleared.
    Completed {
        /// Earliest spawned enemy carrying the typed word.
        enemy: EnemyId,
    },
}

/// Tracks the player's current word attempt.
///
/// The buffer is always empty or a prefix of at least one live enemy's word.
#[derive(Clone, Debug, Default)]
pub struct TypingMatcher {
    buffer: String,
}

impl TypingMatcher {
    /// Creates a matcher with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the input buffer.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.buffer
    }

    /// Appends `character` and resolves it against `enemies`.
    ///
    /// On a match every enemy's matched prefix is recomputed against the new
    /// buffer. A mismatch only clears the buffer: highlight is derived from
    /// the buffer, so it resets on its own, while matched prefixes are left
    /// for the next matching keystroke to recompute.
    ///
    /// `enemies` must be in spawn order; the first exact match wins.
    pub fn type_character(&mut self, character: char, enemies: &mut [Enemy]) -> KeystrokeOutcome {
        self.buffer.push(character);

        let mut matched = false;
        for enemy in enemies.iter() {
            if enemy.word().starts_with(self.buffer.as_str()) {
                matched = true;
                break;
            }
        }

        if !matched {
            self.buffer.clear();
            return KeystrokeOutcome::Mismatch;
        }

        let typed = self.buffer.len();
        for enemy in enemies.iter_mut() {
            let progress = if enemy.word().starts_with(self.buffer.as_str()) {
                typed
            } else {
                0
            };
            enemy.set_matched_prefix_len(progress);
        }

        let completed = enemies
            .iter()
            .filter(|enemy| enemy.word() == self.buffer)
            .map(Enemy::id)
            .min();

        match completed {
            Some(enemy) => {
                self.buffer.clear();
                KeystrokeOutcome::Completed { enemy }
            }
            None => KeystrokeOutcome::Extended,
        }
    }

    /// Empties the buffer, reporting whether anything was discarded.
    pub fn clear(&mut self) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        self.buffer.clear();
        true
    }

    /// Clears the buffer if it no longer prefixes any live word.
    ///
    /// Called after enemies leave the field without being typed.
    pub fn revalidate(&mut self, enemies: &[Enemy]) -> bool {
        if self.buffer.is_empty() {
            return false;
        }
        let still_valid = enemies
            .iter()
            .any(|enemy| enemy.word().starts_with(self.buffer.as_str()));
        if still_valid {
            return false;
        }
        self.buffer.clear();
        true
    }
}

/// Derives the per-character highlight of `word` for the current `input`.
///
/// Characters equal to the input at the same index are matched. While the
/// player is typing, the remaining characters take the tier's baseline;
/// with an empty buffer everything is plain.
#[must_use]
pub fn highlight(word: &str, tier: Tier, input: &str) -> Vec<Glyph> {
    let baseline = match tier {
        Tier::Hard if !input.is_empty() => Glyph::Alert,
        _ => Glyph::Plain,
    };

    let mut typed = input.chars();
    word.chars()
        .map(|expected| match typed.next() {
            Some(character) if character == expected => Glyph::Matched,
            _ => baseline,
        })
        .collect()
}
