#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Keyboard normalisation system that turns raw key presses into engine commands.

use std::collections::VecDeque;

use tracing::trace;
use word_slasher_core::{Command, GamePhase, Key};

/// Translates a single key press into the command it stands for.
///
/// Letters are lowercased, backspace clears the whole input and every other
/// key is ignored.
#[must_use]
pub fn normalize(key: Key) -> Option<Command> {
    match key {
        Key::Character(character) if character.is_ascii_alphabetic() => {
            Some(Command::TypeCharacter {
                character: character.to_ascii_lowercase(),
            })
        }
        Key::Backspace => Some(Command::ClearInput),
        Key::Character(_) | Key::Other => None,
    }
}

/// Queues key presses between frames and flushes them as commands.
#[derive(Debug, Default)]
pub struct Input {
    pending: VecDeque<Key>,
}

impl Input {
    /// Creates an empty input queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key press reported by the adapter.
    pub fn push(&mut self, key: Key) {
        self.pending.push_back(key);
    }

    /// Number of key presses waiting to be flushed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether no key presses are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drains queued key presses into commands, in the order they were pressed.
    ///
    /// Keys pressed while the match is over are discarded.
    pub fn handle(&mut self, phase: GamePhase, out: &mut Vec<Command>) {
        if phase != GamePhase::Playing {
            if !self.pending.is_empty() {
                trace!(dropped = self.pending.len(), "discarding keys after game over");
            }
            self.pending.clear();
            return;
        }

        out.extend(self.pending.drain(..).filter_map(normalize));
    }
}
