#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Slasher engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative match engine, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the engine executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that systems and presentation layers react to deterministically.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Word Slasher.";

/// Describes the active phase of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Enemies advance and keystrokes are resolved.
    Playing,
    /// Terminal freeze-frame state entered once the objective is destroyed.
    GameOver,
}

/// Difficulty tier assigned to an enemy at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Common enemy carrying a short word.
    Basic,
    /// Faster mini-boss carrying a long word.
    Hard,
}

impl Tier {
    /// Every tier in declaration order.
    pub const ALL: [Tier; 2] = [Tier::Basic, Tier::Hard];

    /// Points awarded for typing the word of an enemy of this tier.
    #[must_use]
    pub const fn kill_score(self) -> u32 {
        match self {
            Self::Basic => 10,
            Self::Hard => 30,
        }
    }

    /// Health removed from the objective when an enemy of this tier arrives.
    #[must_use]
    pub const fn escape_damage(self) -> u32 {
        match self {
            Self::Basic => 10,
            Self::Hard => 20,
        }
    }

    /// Lowercase name used in configuration files and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Hard => "hard",
        }
    }
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are allocated from a monotonically increasing spawn sequence,
/// so ordering by identifier is ordering by spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Raw key press reported by an input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A key that produced a printable character.
    Character(char),
    /// The delete/backspace key.
    Backspace,
    /// Any other key (modifiers, navigation, function keys).
    Other,
}

/// Commands that express all permissible engine mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a new enemy enter the field.
    SpawnEnemy {
        /// Difficulty tier chosen for the enemy.
        tier: Tier,
        /// Cross-lane coordinate used by presentation layers.
        lane: f32,
    },
    /// Appends a normalised lowercase character to the input buffer.
    TypeCharacter {
        /// Character typed by the player.
        character: char,
    },
    /// Discards the current input buffer.
    ClearInput,
    /// Reinitialises every component to its construction-time state.
    Restart,
}

/// Events broadcast by the engine after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Difficulty tier of the enemy.
        tier: Tier,
        /// Word the player must type to defeat the enemy.
        word: String,
        /// Progress along the lane at spawn time.
        position: f32,
        /// Cross-lane coordinate of the enemy.
        lane: f32,
        /// Units of progress gained per second.
        speed: f32,
    },
    /// Reports that a keystroke extended at least one live word.
    KeystrokeMatched {
        /// Character that was typed.
        character: char,
        /// Input buffer after the keystroke.
        input: String,
    },
    /// Reports that a keystroke did not extend any live word.
    KeystrokeRejected {
        /// Character that was typed.
        character: char,
    },
    /// Announces that the input buffer was emptied.
    InputCleared,
    /// Confirms that an enemy was defeated by typing its word.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Difficulty tier of the defeated enemy.
        tier: Tier,
        /// Word that was typed.
        word: String,
        /// Progress along the lane at the moment of defeat.
        position: f32,
        /// Cross-lane coordinate of the enemy.
        lane: f32,
        /// Points awarded for the kill.
        points: u32,
    },
    /// Confirms that an enemy reached the objective.
    EnemyEscaped {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
        /// Difficulty tier of the escaped enemy.
        tier: Tier,
        /// Word the enemy carried.
        word: String,
        /// Progress along the lane after crossing the objective threshold.
        position: f32,
        /// Cross-lane coordinate of the enemy.
        lane: f32,
        /// Health removed from the objective.
        damage: u32,
    },
    /// Reports the score after it changed.
    ScoreChanged {
        /// Current score.
        score: u32,
    },
    /// Reports the objective health after it changed.
    HealthChanged {
        /// Current health.
        health: u32,
    },
    /// Announces that the objective was destroyed.
    GameOver {
        /// Score reached when the match ended.
        final_score: u32,
    },
    /// Confirms that the match was reinitialised.
    MatchRestarted,
}

/// Highlight state of a single character of an enemy's word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// The character matches the input buffer at the same index.
    Matched,
    /// Unmatched character of a hard enemy while the player is typing.
    Alert,
    /// Default presentation.
    Plain,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Difficulty tier of the enemy.
    pub tier: Tier,
    /// Word carried by the enemy.
    pub word: String,
    /// Progress along the lane toward the objective.
    pub position: f32,
    /// Cross-lane coordinate of the enemy.
    pub lane: f32,
    /// Units of progress gained per second.
    pub speed: f32,
    /// Number of characters confirmed against the live input buffer.
    pub matched_prefix_len: usize,
    /// Per-character highlight derived from the input buffer.
    pub glyphs: Vec<Glyph>,
}

/// Read-only snapshot describing all live enemies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Looks up the snapshot of a specific enemy.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }
}

/// Everything a presentation layer needs to draw a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Live enemies in spawn order.
    pub enemies: EnemyView,
    /// Current contents of the input buffer.
    pub input: String,
    /// Current score.
    pub score: u32,
    /// Current objective health.
    pub health: u32,
    /// Health the objective starts with.
    pub max_health: u32,
    /// Active game phase.
    pub phase: GamePhase,
}

impl FrameSnapshot {
    /// Health expressed as a whole percentage of the maximum.
    #[must_use]
    pub fn health_percent(&self) -> u32 {
        if self.max_health == 0 {
            return 0;
        }
        self.health.saturating_mul(100) / self.max_health
    }

    /// Reports whether the health bar should be drawn in its warning colour.
    #[must_use]
    pub fn health_critical(&self) -> bool {
        self.health_percent() <= 50
    }
}
