//! Session files describing a match and its spawn cadence.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;
use word_slasher_system_spawning::Config as SpawningConfig;
use word_slasher_world::MatchConfig;

/// Contents of a TOML session file. Every table is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionFile {
    #[serde(rename = "match")]
    pub(crate) match_config: MatchConfig,
    pub(crate) spawning: SpawningSection,
}

/// The `[spawning]` table.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SpawningSection {
    interval_ms: u64,
    hard_chance: f64,
    lane_min: f32,
    lane_max: f32,
    seed: Option<u64>,
}

impl Default for SpawningSection {
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            hard_chance: 0.3,
            lane_min: 150.0,
            lane_max: 550.0,
            seed: None,
        }
    }
}

impl SpawningSection {
    /// Builds the spawning configuration, falling back to `match_seed` when
    /// the table names no seed of its own.
    pub(crate) fn to_config(&self, match_seed: u64) -> Result<SpawningConfig> {
        let seed = self.seed.unwrap_or(match_seed);
        SpawningConfig::new(
            Duration::from_millis(self.interval_ms),
            self.hard_chance,
            self.lane_min,
            self.lane_max,
            seed,
        )
        .context("invalid [spawning] table")
    }
}

impl SessionFile {
    /// Reads and parses the session file located at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load session file {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse session toml contents")
    }

    /// Replaces every seed in the session with `seed`.
    pub(crate) fn reseed(&mut self, seed: u64) {
        self.match_config.seed = seed;
        self.spawning.seed = Some(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_slasher_world::SpeedRange;

    #[test]
    fn empty_file_uses_defaults() {
        let session = SessionFile::parse("").expect("empty session parses");
        assert_eq!(session.match_config, MatchConfig::default());
        let spawning = session.spawning.to_config(7).expect("default spawning");
        assert_eq!(spawning.spawn_interval(), Duration::from_secs(2));
    }

    #[test]
    fn partial_tables_override_defaults() {
        let session = SessionFile::parse(
            r#"
            [match]
            objective_threshold = 900.0
            max_health = 40
            seed = 99

            [match.hard]
            words = ["keyboard", "monitor"]
            speed = { min = 120.0, max = 150.0 }

            [spawning]
            interval_ms = 750
            hard_chance = 0.5
            "#,
        )
        .expect("session parses");

        assert_eq!(session.match_config.objective_threshold, 900.0);
        assert_eq!(session.match_config.max_health, 40);
        assert_eq!(session.match_config.seed, 99);
        assert_eq!(session.match_config.hard.words, ["keyboard", "monitor"]);
        assert_eq!(
            session.match_config.hard.speed,
            SpeedRange::new(120.0, 150.0)
        );
        assert_eq!(
            session.match_config.basic,
            MatchConfig::default().basic,
            "untouched tier keeps defaults"
        );

        let spawning = session.spawning.to_config(1).expect("valid spawning");
        assert_eq!(spawning.spawn_interval(), Duration::from_millis(750));
        assert_eq!(spawning.hard_chance(), 0.5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = SessionFile::parse("[match]\nlives = 3\n").expect_err("unknown key");
        assert!(format!("{error:#}").contains("lives"));
    }

    #[test]
    fn invalid_spawning_table_is_reported() {
        let session =
            SessionFile::parse("[spawning]\nhard_chance = 2.0\n").expect("session parses");
        let error = session.spawning.to_config(1).expect_err("chance out of range");
        assert!(format!("{error:#}").contains("[spawning]"));
    }

    #[test]
    fn reseed_overrides_both_tables() {
        let mut session = SessionFile::default();
        session.reseed(42);
        assert_eq!(session.match_config.seed, 42);
        assert_eq!(session.spawning.seed, Some(42));
    }
}
