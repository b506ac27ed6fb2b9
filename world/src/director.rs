//! Enemy lifecycle: spawning, advancing, escaping and defeat.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use word_slasher_core::{EnemyId, Tier};

use crate::{config::SpeedRange, word_pool::WordPool};

const SPEED_STREAM: u64 = 1;

/// Lifecycle state of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// The enemy is on the field.
    Alive,
    /// The player typed the enemy's word.
    Defeated,
    /// The enemy reached the objective.
    Escaped,
}

/// A single enemy advancing toward the objective.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    tier: Tier,
    word: String,
    position: f32,
    lane: f32,
    speed: f32,
    matched_prefix_len: usize,
    state: EnemyState,
}

impl Enemy {
    /// Identifier allocated from the spawn sequence.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Difficulty tier of the enemy.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Word the player must type.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Progress along the lane toward the objective.
    #[must_use]
    pub const fn position(&self) -> f32 {
        self.position
    }

    /// Cross-lane coordinate.
    #[must_use]
    pub const fn lane(&self) -> f32 {
        self.lane
    }

    /// Units of progress gained per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Characters of the word confirmed against the live input buffer.
    #[must_use]
    pub const fn matched_prefix_len(&self) -> usize {
        self.matched_prefix_len
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EnemyState {
        self.state
    }

    pub(crate) fn set_matched_prefix_len(&mut self, len: usize) {
        self.matched_prefix_len = len.min(self.word.len());
    }
}

/// Enemy that crossed the objective threshold during a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    /// The escaped enemy, already removed from the field.
    pub enemy: Enemy,
    /// Health the enemy removes from the objective.
    pub damage: u32,
}

/// Owns the live enemy collection.
///
/// Enemies are stored in spawn order, which is also identifier order; every
/// scan over the collection therefore visits older enemies first.
#[derive(Debug)]
pub struct EnemyDirector {
    enemies: Vec<Enemy>,
    next_id: u32,
    objective_threshold: f32,
    rng: ChaCha8Rng,
}

impl EnemyDirector {
    /// Creates an empty director whose enemies escape past `objective_threshold`.
    #[must_use]
    pub fn new(objective_threshold: f32, seed: u64) -> Self {
        Self {
            enemies: Vec::new(),
            next_id: 0,
            objective_threshold,
            rng: speed_rng(seed),
        }
    }

    /// Live enemies in spawn order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Number of live enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether the field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Creates an enemy carrying a fresh word from `pool`.
    ///
    /// Identifiers never wrap: once the `u32` sequence is spent, no enemy is
    /// created and `None` is returned, so spawn order always equals id order.
    pub fn spawn(
        &mut self,
        pool: &mut WordPool,
        tier: Tier,
        speed: SpeedRange,
        start_position: f32,
        lane: f32,
    ) -> Option<&Enemy> {
        let next_id = self.next_id.checked_add(1)?;
        let id = EnemyId::new(self.next_id);
        self.next_id = next_id;

        let speed = if speed.min() < speed.max() {
            self.rng.gen_range(speed.min()..=speed.max())
        } else {
            speed.min()
        };

        self.enemies.push(Enemy {
            id,
            tier,
            word: pool.draw_word(tier),
            position: start_position,
            lane,
            speed,
            matched_prefix_len: 0,
            state: EnemyState::Alive,
        });
        self.enemies.last()
    }

    /// Advances every enemy and removes those that reached the objective.
    ///
    /// All positions are updated before any arrival is resolved, and arrivals
    /// are reported in spawn order.
    pub fn tick(&mut self, dt: Duration, pool: &mut WordPool) -> Vec<Arrival> {
        let seconds = dt.as_secs_f32();
        for enemy in &mut self.enemies {
            enemy.position += enemy.speed * seconds;
        }

        let threshold = self.objective_threshold;
        let mut arrivals = Vec::new();
        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].position > threshold {
                let mut enemy = self.enemies.remove(index);
                enemy.state = EnemyState::Escaped;
                pool.release(&enemy.word);
                arrivals.push(Arrival {
                    damage: enemy.tier.escape_damage(),
                    enemy,
                });
            } else {
                index += 1;
            }
        }
        arrivals
    }

    /// Removes an enemy whose word was typed, returning it in the defeated state.
    pub fn defeat(&mut self, id: EnemyId, pool: &mut WordPool) -> Option<Enemy> {
        let index = self.index_of(id)?;
        let mut enemy = self.enemies.remove(index);
        enemy.state = EnemyState::Defeated;
        pool.release(&enemy.word);
        Some(enemy)
    }

    /// Removes every enemy and releases their words, returning how many were removed.
    pub fn drain(&mut self, pool: &mut WordPool) -> usize {
        let count = self.enemies.len();
        for enemy in self.enemies.drain(..) {
            pool.release(&enemy.word);
        }
        count
    }

    /// Empties the field and rewinds the identifier sequence and speed rolls.
    pub(crate) fn reset(&mut self, pool: &mut WordPool, seed: u64) {
        let _ = self.drain(pool);
        self.next_id = 0;
        self.rng = speed_rng(seed);
    }

    fn index_of(&self, id: EnemyId) -> Option<usize> {
        self.enemies
            .binary_search_by_key(&id, |enemy| enemy.id)
            .ok()
    }
}

fn speed_rng(seed: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(SPEED_STREAM);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> WordPool {
        let basic = ["game", "word", "score"].map(String::from).to_vec();
        let hard = ["programming", "experience"].map(String::from).to_vec();
        WordPool::new(basic, hard, 3).expect("valid word lists")
    }

    #[test]
    fn spawn_assigns_fresh_state() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(100.0, 9);
        let enemy = director
            .spawn(&mut pool, Tier::Hard, SpeedRange::new(4.0, 5.0), 0.0, 320.0)
            .cloned()
            .expect("identifier available");

        assert_eq!(enemy.id(), EnemyId::new(0));
        assert_eq!(enemy.state(), EnemyState::Alive);
        assert_eq!(enemy.matched_prefix_len(), 0);
        assert!((4.0..=5.0).contains(&enemy.speed()));
        assert!(pool.is_active(enemy.word()));
        assert!(pool.words(Tier::Hard).iter().any(|word| word == enemy.word()));
    }

    #[test]
    fn simultaneous_arrivals_are_all_reported_in_spawn_order() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(10.0, 9);
        let _ = director.spawn(&mut pool, Tier::Basic, SpeedRange::fixed(6.0), 0.0, 0.0);
        let _ = director.spawn(&mut pool, Tier::Basic, SpeedRange::fixed(1.0), 0.0, 0.0);
        let _ = director.spawn(&mut pool, Tier::Hard, SpeedRange::fixed(5.5), 0.0, 0.0);

        assert!(director.tick(Duration::from_secs(1), &mut pool).is_empty());
        let arrivals = director.tick(Duration::from_secs(1), &mut pool);

        let ids: Vec<u32> = arrivals.iter().map(|a| a.enemy.id().get()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(arrivals[0].damage, 10);
        assert_eq!(arrivals[1].damage, 20);
        assert!(arrivals
            .iter()
            .all(|a| a.enemy.state() == EnemyState::Escaped && !pool.is_active(a.enemy.word())));
        assert_eq!(director.len(), 1);
    }

    #[test]
    fn reaching_the_threshold_exactly_is_not_an_arrival() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(10.0, 9);
        let _ = director.spawn(&mut pool, Tier::Basic, SpeedRange::fixed(10.0), 0.0, 0.0);
        assert!(director.tick(Duration::from_secs(1), &mut pool).is_empty());
    }

    #[test]
    fn defeat_releases_word_and_ignores_unknown_ids() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(10.0, 9);
        let id = director
            .spawn(&mut pool, Tier::Basic, SpeedRange::fixed(1.0), 0.0, 0.0)
            .map(Enemy::id)
            .expect("identifier available");

        let defeated = director.defeat(id, &mut pool).expect("enemy is alive");
        assert_eq!(defeated.state(), EnemyState::Defeated);
        assert!(!pool.is_active(defeated.word()));
        assert!(director.defeat(id, &mut pool).is_none());
    }

    #[test]
    fn spawn_refuses_to_wrap_identifiers() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(10.0, 9);
        director.next_id = u32::MAX - 1;

        let last = director
            .spawn(&mut pool, Tier::Basic, SpeedRange::fixed(1.0), 0.0, 0.0)
            .map(Enemy::id);
        assert_eq!(last, Some(EnemyId::new(u32::MAX - 1)));

        assert!(director
            .spawn(&mut pool, Tier::Basic, SpeedRange::fixed(1.0), 0.0, 0.0)
            .is_none());
        assert_eq!(director.len(), 1);
        assert_eq!(pool.active_len(), 1, "no word is reserved for a refused spawn");
    }

    #[test]
    fn drain_releases_every_word() {
        let mut pool = pool();
        let mut director = EnemyDirector::new(10.0, 9);
        for _ in 0..3 {
            let _ = director.spawn(&mut pool, Tier::Basic, SpeedRange::fixed(1.0), 0.0, 0.0);
        }
        assert_eq!(director.drain(&mut pool), 3);
        assert!(director.is_empty());
        assert_eq!(pool.active_len(), 0);
    }
}
