#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative match state for Word Slasher.
//!
//! [`MatchEngine`] composes the [`WordPool`], the [`EnemyDirector`] and the
//! [`TypingMatcher`], and owns score, objective health and the game phase.
//! All mutation flows through [`apply`]; read-only access lives in [`query`].

mod config;
mod director;
mod typing;
mod word_pool;

use std::time::Duration;

use tracing::{debug, info, warn};
use word_slasher_core::{Command, Event, GamePhase, Tier};

pub use config::{
    ConfigError, MatchConfig, SpeedRange, TierConfig, DEFAULT_BASIC_WORDS, DEFAULT_HARD_WORDS,
};
pub use director::{Arrival, Enemy, EnemyDirector, EnemyState};
pub use typing::{highlight, KeystrokeOutcome, TypingMatcher};
pub use word_pool::WordPool;

/// Represents the authoritative state of a single match.
#[derive(Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    pool: WordPool,
    director: EnemyDirector,
    typing: TypingMatcher,
    score: u32,
    health: u32,
    phase: GamePhase,
}

impl MatchEngine {
    /// Creates a match ready for play, rejecting malformed configuration.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = WordPool::new(
            config.basic.words.clone(),
            config.hard.words.clone(),
            config.seed,
        )?;
        let director = EnemyDirector::new(config.objective_threshold, config.seed);

        Ok(Self {
            pool,
            director,
            typing: TypingMatcher::new(),
            score: 0,
            health: config.max_health,
            phase: GamePhase::Playing,
            config,
        })
    }

    /// Removes `amount` health from the objective, entering game over at zero.
    ///
    /// Has no effect once the match is over.
    pub fn apply_damage(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::GameOver {
            return;
        }

        self.health = self.health.saturating_sub(amount);
        out_events.push(Event::HealthChanged {
            health: self.health,
        });

        if self.health == 0 {
            self.enter_game_over(out_events);
        }
    }

    fn enter_game_over(&mut self, out_events: &mut Vec<Event>) {
        self.phase = GamePhase::GameOver;
        let drained = self.director.drain(&mut self.pool);
        self.pool.release_all();
        if self.typing.clear() {
            out_events.push(Event::InputCleared);
        }

        info!(
            final_score = self.score,
            drained, "objective destroyed; match over"
        );
        out_events.push(Event::GameOver {
            final_score: self.score,
        });
    }

    fn restart(&mut self, out_events: &mut Vec<Event>) {
        let seed = self.config.seed;
        self.director.reset(&mut self.pool, seed);
        self.pool.reset(seed);
        if self.typing.clear() {
            out_events.push(Event::InputCleared);
        }
        self.score = 0;
        self.health = self.config.max_health;
        self.phase = GamePhase::Playing;
        info!("match restarted");
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        let arrivals = self.director.tick(dt, &mut self.pool);
        if arrivals.is_empty() {
            return;
        }

        let mut damage = 0u32;
        for Arrival { enemy, damage: dealt } in arrivals {
            info!(
                enemy = enemy.id().get(),
                tier = enemy.tier().name(),
                word = enemy.word(),
                damage = dealt,
                "enemy reached the objective"
            );
            damage = damage.saturating_add(dealt);
            out_events.push(Event::EnemyEscaped {
                enemy: enemy.id(),
                tier: enemy.tier(),
                word: enemy.word().to_owned(),
                position: enemy.position(),
                lane: enemy.lane(),
                damage: dealt,
            });
        }

        if self.typing.revalidate(self.director.enemies()) {
            out_events.push(Event::InputCleared);
        }

        self.apply_damage(damage, out_events);
    }

    fn spawn(&mut self, tier: Tier, lane: f32, out_events: &mut Vec<Event>) {
        let speed = self.config.tier(tier).speed;
        let start = self.config.start_position;
        let Some(enemy) = self.director.spawn(&mut self.pool, tier, speed, start, lane) else {
            warn!(tier = tier.name(), "enemy identifiers exhausted; spawn skipped");
            return;
        };

        debug!(
            enemy = enemy.id().get(),
            tier = tier.name(),
            word = enemy.word(),
            speed = enemy.speed(),
            "enemy spawned"
        );
        out_events.push(Event::EnemySpawned {
            enemy: enemy.id(),
            tier,
            word: enemy.word().to_owned(),
            position: enemy.position(),
            lane: enemy.lane(),
            speed: enemy.speed(),
        });
    }

    fn type_character(&mut self, character: char, out_events: &mut Vec<Event>) {
        let outcome = self
            .typing
            .type_character(character, self.director.enemies_mut());

        match outcome {
            KeystrokeOutcome::Extended => {
                debug!(%character, input = self.typing.input(), "keystroke matched");
                out_events.push(Event::KeystrokeMatched {
                    character,
                    input: self.typing.input().to_owned(),
                });
            }
            KeystrokeOutcome::Mismatch => {
                debug!(%character, "keystroke rejected");
                out_events.push(Event::KeystrokeRejected { character });
                out_events.push(Event::InputCleared);
            }
            KeystrokeOutcome::Completed { enemy } => {
                let Some(defeated) = self.director.defeat(enemy, &mut self.pool) else {
                    out_events.push(Event::InputCleared);
                    return;
                };
                let points = defeated.tier().kill_score();
                self.score = self.score.saturating_add(points);

                info!(
                    enemy = enemy.get(),
                    tier = defeated.tier().name(),
                    word = defeated.word(),
                    score = self.score,
                    "enemy defeated"
                );
                out_events.push(Event::KeystrokeMatched {
                    character,
                    input: defeated.word().to_owned(),
                });
                out_events.push(Event::EnemyDefeated {
                    enemy,
                    tier: defeated.tier(),
                    word: defeated.word().to_owned(),
                    position: defeated.position(),
                    lane: defeated.lane(),
                    points,
                });
                out_events.push(Event::ScoreChanged { score: self.score });
                out_events.push(Event::InputCleared);
            }
        }
    }
}

/// Applies the provided command to the match, mutating state deterministically.
///
/// While the match is over only [`Command::Restart`] has an effect.
pub fn apply(engine: &mut MatchEngine, command: Command, out_events: &mut Vec<Event>) {
    if engine.phase == GamePhase::GameOver && command != Command::Restart {
        return;
    }

    match command {
        Command::Tick { dt } => engine.tick(dt, out_events),
        Command::SpawnEnemy { tier, lane } => engine.spawn(tier, lane, out_events),
        Command::TypeCharacter { character } => engine.type_character(character, out_events),
        Command::ClearInput => {
            if engine.typing.clear() {
                out_events.push(Event::InputCleared);
            }
        }
        Command::Restart => {
            engine.restart(out_events);
            out_events.push(Event::MatchRestarted);
        }
    }
}

/// Query functions that provide read-only access to the match state.
pub mod query {
    use word_slasher_core::{EnemySnapshot, EnemyView, FrameSnapshot, GamePhase};

    use super::{highlight, Enemy, MatchConfig, MatchEngine, WordPool};

    /// Current score.
    #[must_use]
    pub fn score(engine: &MatchEngine) -> u32 {
        engine.score
    }

    /// Current objective health.
    #[must_use]
    pub fn health(engine: &MatchEngine) -> u32 {
        engine.health
    }

    /// Active game phase.
    #[must_use]
    pub fn phase(engine: &MatchEngine) -> GamePhase {
        engine.phase
    }

    /// Current contents of the input buffer.
    #[must_use]
    pub fn input(engine: &MatchEngine) -> &str {
        engine.typing.input()
    }

    /// Configuration the match was built from.
    #[must_use]
    pub fn config(engine: &MatchEngine) -> &MatchConfig {
        &engine.config
    }

    /// Live enemies in spawn order.
    #[must_use]
    pub fn enemies(engine: &MatchEngine) -> &[Enemy] {
        engine.director.enemies()
    }

    /// Provides read-only access to the word pool.
    #[must_use]
    pub fn word_pool(engine: &MatchEngine) -> &WordPool {
        &engine.pool
    }

    /// Captures a read-only view of the live enemies with derived highlight.
    #[must_use]
    pub fn enemy_view(engine: &MatchEngine) -> EnemyView {
        let input = engine.typing.input();
        let snapshots = engine
            .director
            .enemies()
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id(),
                tier: enemy.tier(),
                word: enemy.word().to_owned(),
                position: enemy.position(),
                lane: enemy.lane(),
                speed: enemy.speed(),
                matched_prefix_len: enemy.matched_prefix_len(),
                glyphs: highlight(enemy.word(), enemy.tier(), input),
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures everything a presentation layer needs to draw a frame.
    #[must_use]
    pub fn snapshot(engine: &MatchEngine) -> FrameSnapshot {
        FrameSnapshot {
            enemies: enemy_view(engine),
            input: engine.typing.input().to_owned(),
            score: engine.score,
            health: engine.health,
            max_health: engine.config.max_health,
            phase: engine.phase,
        }
    }
}
