//! Simulated player that types at the enemy closest to the objective.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use word_slasher_core::{EnemySnapshot, FrameSnapshot, Key};
use word_slasher_system_input::Input;

const TYPIST_STREAM: u64 = 2;

/// Keystroke-budgeted autoplayer.
///
/// The typist earns `keys_per_second` keystrokes per second of simulated time
/// and spends them on the most advanced enemy that still agrees with the
/// current input. A typo ends the burst so the next frame observes the
/// cleared input.
#[derive(Debug)]
pub(crate) struct Typist {
    keys_per_second: f64,
    typo_rate: f64,
    budget: f64,
    rng: ChaCha8Rng,
}

impl Typist {
    pub(crate) fn new(keys_per_second: f64, typo_rate: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(TYPIST_STREAM);
        Self {
            keys_per_second: keys_per_second.max(0.0),
            typo_rate: typo_rate.clamp(0.0, 1.0),
            budget: 0.0,
            rng,
        }
    }

    /// Queues the keystrokes affordable during `dt` onto `input`.
    pub(crate) fn press(&mut self, dt: Duration, frame: &FrameSnapshot, input: &mut Input) {
        self.budget += dt.as_secs_f64() * self.keys_per_second;

        let Some(target) = pick_target(frame) else {
            self.budget = self.budget.min(1.0);
            return;
        };

        let mut typed = frame.input.len();
        while self.budget >= 1.0 {
            self.budget -= 1.0;

            if self.rng.gen_bool(self.typo_rate) {
                let typo = char::from(self.rng.gen_range(b'a'..=b'z'));
                input.push(Key::Character(typo));
                return;
            }

            let Some(next) = target.word.get(typed..).and_then(|rest| rest.chars().next()) else {
                return;
            };
            input.push(Key::Character(next));
            typed += next.len_utf8();
            if typed == target.word.len() {
                return;
            }
        }
    }
}

fn pick_target(frame: &FrameSnapshot) -> Option<&EnemySnapshot> {
    frame
        .enemies
        .iter()
        .filter(|enemy| enemy.word.starts_with(frame.input.as_str()))
        .max_by(|left, right| left.position.total_cmp(&right.position))
}
