#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use word_slasher_core::{Command, Event, GamePhase, Tier};

const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_HARD_CHANCE: f64 = 0.3;
const DEFAULT_LANE_MIN: f32 = 150.0;
const DEFAULT_LANE_MAX: f32 = 550.0;
const DEFAULT_SEED: u64 = 0x4d59_5df4_d0f3_3173;
const SPAWN_STREAM: u64 = 3;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: Duration,
    hard_chance: f64,
    lane_min: f32,
    lane_max: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence, tier weighting and lane bounds.
    pub fn new(
        spawn_interval: Duration,
        hard_chance: f64,
        lane_min: f32,
        lane_max: f32,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&hard_chance) {
            return Err(ConfigError::HardChance(hard_chance));
        }
        if !lane_min.is_finite() || !lane_max.is_finite() || lane_min > lane_max {
            return Err(ConfigError::LaneRange {
                min: lane_min,
                max: lane_max,
            });
        }

        Ok(Self {
            spawn_interval,
            hard_chance,
            lane_min,
            lane_max,
            rng_seed,
        })
    }

    /// Time between successive spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        self.spawn_interval
    }

    /// Probability that a spawn rolls the hard tier.
    #[must_use]
    pub const fn hard_chance(&self) -> f64 {
        self.hard_chance
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            hard_chance: DEFAULT_HARD_CHANCE,
            lane_min: DEFAULT_LANE_MIN,
            lane_max: DEFAULT_LANE_MAX,
            rng_seed: DEFAULT_SEED,
        }
    }
}

/// Reasons a spawning configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The hard-tier probability lies outside `0.0..=1.0`.
    #[error("hard tier chance {0} must lie within 0.0..=1.0")]
    HardChance(f64),
    /// The lane bounds are inverted or not finite.
    #[error("lane range {min}..={max} is invalid")]
    LaneRange {
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
}

/// Pure system that deterministically emits spawn commands while a match is playing.
///
/// Each spawn flips a weighted coin for the tier and rolls a lane. A restart
/// rewinds the cadence and the random sequence.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            accumulator: Duration::ZERO,
            rng: seeded_rng(config.rng_seed),
        }
    }

    /// Consumes events to emit spawn commands.
    pub fn handle(&mut self, events: &[Event], phase: GamePhase, out: &mut Vec<Command>) {
        if phase != GamePhase::Playing {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.config.spawn_interval.is_zero() {
            return;
        }

        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::MatchRestarted => {
                    self.accumulator = Duration::ZERO;
                    self.rng = seeded_rng(self.config.rng_seed);
                    accumulated = Duration::ZERO;
                }
                _ => {}
            }
        }

        if accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        let spawn_attempts = self.resolve_spawn_attempts();

        for _ in 0..spawn_attempts {
            let tier = self.roll_tier();
            let lane = self.roll_lane();
            out.push(Command::SpawnEnemy { tier, lane });
        }
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.config.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.config.spawn_interval {
            self.accumulator -= self.config.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn roll_tier(&mut self) -> Tier {
        if self.rng.gen_bool(self.config.hard_chance) {
            Tier::Hard
        } else {
            Tier::Basic
        }
    }

    fn roll_lane(&mut self) -> f32 {
        if self.config.lane_min < self.config.lane_max {
            self.rng.gen_range(self.config.lane_min..=self.config.lane_max)
        } else {
            self.config.lane_min
        }
    }
}

fn seeded_rng(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(SPAWN_STREAM);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_spawn_attempts_without_interval() {
        let config = Config::new(Duration::ZERO, 0.3, 0.0, 1.0, 1).expect("valid config");
        let mut spawning = Spawning::new(config);
        spawning.accumulator = Duration::from_secs(10);
        assert_eq!(spawning.resolve_spawn_attempts(), 0);
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        assert_eq!(
            Config::new(Duration::from_secs(1), 1.5, 0.0, 1.0, 1),
            Err(ConfigError::HardChance(1.5))
        );
    }

    #[test]
    fn rejects_inverted_lanes() {
        assert!(matches!(
            Config::new(Duration::from_secs(1), 0.5, 10.0, 1.0, 1),
            Err(ConfigError::LaneRange { .. })
        ));
    }

    #[test]
    fn certain_coin_always_lands_on_hard() {
        let config = Config::new(Duration::from_secs(1), 1.0, 5.0, 5.0, 1).expect("valid config");
        let mut spawning = Spawning::new(config);
        for _ in 0..16 {
            assert_eq!(spawning.roll_tier(), Tier::Hard);
            assert!((spawning.roll_lane() - 5.0).abs() < f32::EPSILON);
        }
    }
}
