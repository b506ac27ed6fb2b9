use std::{collections::HashSet, time::Duration};

use proptest::prelude::*;
use word_slasher_core::{Command, Event, Tier};
use word_slasher_world::{self as world, query, MatchConfig, MatchEngine, SpeedRange, TierConfig};

const BASIC_WORDS: [&str; 7] = ["abc", "abd", "bad", "cab", "dab", "ace", "bead"];
const HARD_WORDS: [&str; 3] = ["decade", "facade", "accede"];

#[derive(Clone, Debug)]
enum Op {
    Spawn(Tier),
    Type(char),
    Backspace,
    Tick(u64),
}

fn engine() -> MatchEngine {
    let config = MatchConfig {
        basic: TierConfig {
            words: BASIC_WORDS.iter().map(|word| (*word).to_owned()).collect(),
            speed: SpeedRange::new(10.0, 30.0),
        },
        hard: TierConfig {
            words: HARD_WORDS.iter().map(|word| (*word).to_owned()).collect(),
            speed: SpeedRange::new(40.0, 50.0),
        },
        objective_threshold: 200.0,
        max_health: 1_000,
        ..MatchConfig::default()
    };
    MatchEngine::new(config).expect("valid configuration")
}

fn tier() -> impl Strategy<Value = Tier> {
    prop_oneof![Just(Tier::Basic), Just(Tier::Hard)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => tier().prop_map(Op::Spawn),
        6 => (b'a'..=b'f').prop_map(|byte| Op::Type(char::from(byte))),
        1 => Just(Op::Backspace),
        1 => (1u64..4).prop_map(Op::Tick),
    ]
}

fn command(op: &Op) -> Command {
    match op {
        Op::Spawn(tier) => Command::SpawnEnemy {
            tier: *tier,
            lane: 0.0,
        },
        Op::Type(character) => Command::TypeCharacter {
            character: *character,
        },
        Op::Backspace => Command::ClearInput,
        Op::Tick(seconds) => Command::Tick {
            dt: Duration::from_secs(*seconds),
        },
    }
}

proptest! {
    #[test]
    fn live_words_are_unique_while_tiers_have_room(
        basic in 0usize..=BASIC_WORDS.len(),
        hard in 0usize..=HARD_WORDS.len(),
        hard_first in any::<bool>(),
    ) {
        let mut engine = engine();
        let mut order = vec![Tier::Basic; basic];
        order.extend(std::iter::repeat(Tier::Hard).take(hard));
        if hard_first {
            order.reverse();
        }

        let mut events = Vec::new();
        for tier in order {
            world::apply(&mut engine, Command::SpawnEnemy { tier, lane: 0.0 }, &mut events);
        }

        let words: HashSet<&str> = query::enemies(&engine).iter().map(|enemy| enemy.word()).collect();
        prop_assert_eq!(words.len(), basic + hard);
        prop_assert_eq!(query::word_pool(&engine).active_len(), basic + hard);
    }

    #[test]
    fn input_is_always_a_live_prefix(ops in prop::collection::vec(op(), 0..80)) {
        let mut engine = engine();
        let mut events = Vec::new();

        for op in &ops {
            let before = query::score(&engine);
            world::apply(&mut engine, command(op), &mut events);

            let input = query::input(&engine);
            let enemies = query::enemies(&engine);
            if !input.is_empty() {
                prop_assert!(enemies.iter().any(|enemy| enemy.word().starts_with(input)));
                for enemy in enemies {
                    if enemy.matched_prefix_len() == input.len() {
                        prop_assert!(enemy.word().starts_with(input));
                    }
                }
            }
            prop_assert!(query::score(&engine) >= before);
        }
    }

    #[test]
    fn mismatched_character_always_empties_input(ops in prop::collection::vec(op(), 0..40)) {
        let mut engine = engine();
        let mut events = Vec::new();
        for op in &ops {
            world::apply(&mut engine, command(op), &mut events);
        }

        let input = query::input(&engine).to_owned();
        let extends = |character: char| {
            let attempt = format!("{input}{character}");
            query::enemies(&engine)
                .iter()
                .any(|enemy| enemy.word().starts_with(attempt.as_str()))
        };
        let Some(dead_end) = ('a'..='z').find(|character| !extends(*character)) else {
            return Ok(());
        };

        events.clear();
        world::apply(&mut engine, Command::TypeCharacter { character: dead_end }, &mut events);
        prop_assert_eq!(query::input(&engine), "");
        let rejected = Event::KeystrokeRejected { character: dead_end };
        prop_assert!(events.contains(&rejected));
    }
}
