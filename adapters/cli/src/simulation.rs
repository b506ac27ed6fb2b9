//! Fixed-step headless match loop.

use std::time::Duration;

use word_slasher_core::{Command, Event, GamePhase};
use word_slasher_system_input::Input;
use word_slasher_system_spawning::Spawning;
use word_slasher_world::{self as world, query, MatchEngine};

use crate::typist::Typist;

/// Totals gathered while the simulation runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) elapsed: Duration,
    pub(crate) spawned: u32,
    pub(crate) defeated: u32,
    pub(crate) escaped: u32,
    pub(crate) keystrokes: u32,
    pub(crate) rejected: u32,
    pub(crate) score: u32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) game_over: bool,
}

impl Summary {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemySpawned { .. } => self.spawned += 1,
                Event::EnemyDefeated { .. } => self.defeated += 1,
                Event::EnemyEscaped { .. } => self.escaped += 1,
                Event::KeystrokeMatched { .. } => self.keystrokes += 1,
                Event::KeystrokeRejected { .. } => {
                    self.keystrokes += 1;
                    self.rejected += 1;
                }
                Event::GameOver { .. } => self.game_over = true,
                _ => {}
            }
        }
    }

    /// Share of keystrokes that extended a word, in percent.
    pub(crate) fn accuracy_percent(&self) -> u32 {
        if self.keystrokes == 0 {
            return 100;
        }
        (self.keystrokes - self.rejected) * 100 / self.keystrokes
    }
}

/// Wires the engine, the systems and the autoplayer into a single loop.
#[derive(Debug)]
pub(crate) struct Simulation {
    engine: MatchEngine,
    spawning: Spawning,
    input: Input,
    typist: Typist,
}

impl Simulation {
    pub(crate) fn new(engine: MatchEngine, spawning: Spawning, typist: Typist) -> Self {
        Self {
            engine,
            spawning,
            input: Input::new(),
            typist,
        }
    }

    /// Steps the match by `tick` until `duration` elapses or the objective falls.
    pub(crate) fn run(&mut self, duration: Duration, tick: Duration) -> Summary {
        let mut summary = Summary::default();
        if tick.is_zero() {
            return self.finish(summary);
        }

        while summary.elapsed < duration {
            let events = self.step(tick);
            summary.record(&events);
            summary.elapsed += tick;

            if query::phase(&self.engine) == GamePhase::GameOver {
                break;
            }
        }

        self.finish(summary)
    }

    fn step(&mut self, tick: Duration) -> Vec<Event> {
        let frame = query::snapshot(&self.engine);
        self.typist.press(tick, &frame, &mut self.input);

        let mut commands = Vec::new();
        self.input.handle(query::phase(&self.engine), &mut commands);
        commands.push(Command::Tick { dt: tick });

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.engine, command, &mut events);
        }

        let mut spawns = Vec::new();
        self.spawning
            .handle(&events, query::phase(&self.engine), &mut spawns);
        for command in spawns {
            world::apply(&mut self.engine, command, &mut events);
        }

        events
    }

    fn finish(&self, mut summary: Summary) -> Summary {
        summary.score = query::score(&self.engine);
        summary.health = query::health(&self.engine);
        summary.max_health = query::config(&self.engine).max_health;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_slasher_system_spawning::Config as SpawningConfig;
    use word_slasher_world::MatchConfig;

    const TICK: Duration = Duration::from_millis(50);

    fn simulation(keys_per_second: f64, typo_rate: f64) -> Simulation {
        let engine = MatchEngine::new(MatchConfig::default()).expect("default configuration");
        let spawning = Spawning::new(SpawningConfig::default());
        Simulation::new(engine, spawning, Typist::new(keys_per_second, typo_rate, 3))
    }

    #[test]
    fn idle_player_loses_the_objective() {
        let summary = simulation(0.0, 0.0).run(Duration::from_secs(300), TICK);

        assert!(summary.game_over);
        assert_eq!(summary.health, 0);
        assert_eq!(summary.max_health, 100);
        assert_eq!(summary.defeated, 0);
        assert_eq!(summary.score, 0);
        assert!(summary.escaped >= 5);
        assert!(summary.elapsed < Duration::from_secs(300));
    }

    #[test]
    fn fast_accurate_player_scores() {
        let summary = simulation(20.0, 0.0).run(Duration::from_secs(60), TICK);

        assert!(summary.defeated > 0);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.accuracy_percent(), 100);
        assert!(summary.score >= summary.defeated * 10);
    }

    #[test]
    fn typos_are_rejected_and_counted() {
        let summary = simulation(20.0, 0.5).run(Duration::from_secs(30), TICK);

        assert!(summary.rejected > 0);
        assert!(summary.accuracy_percent() < 100);
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let first = simulation(6.0, 0.1).run(Duration::from_secs(45), TICK);
        let second = simulation(6.0, 0.1).run(Duration::from_secs(45), TICK);

        assert_eq!(first, second);
    }
}
