//! Ordering of templates handed out by the gap-filler.
//!
//! The scheduler draws templates in a random order so that a minion does not
//! get the same chores in the same sequence every month. The order is the
//! only source of non-determinism in the engine and is injected through
//! [`Shuffler`] so tests can fix it.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use shared::Task;
use std::sync::Mutex;

/// Permutes the templates of one domain before they are handed out
pub trait Shuffler: Send + Sync {
    fn shuffle(&self, tasks: &mut [Task]);
}

/// Uniform random permutation from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffler;

impl Shuffler for RandomShuffler {
    fn shuffle(&self, tasks: &mut [Task]) {
        tasks.shuffle(&mut rand::thread_rng());
    }
}

/// Reproducible permutations from a fixed seed
pub struct SeededShuffler {
    rng: Mutex<StdRng>,
}

impl SeededShuffler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Shuffler for SeededShuffler {
    fn shuffle(&self, tasks: &mut [Task]) {
        // a poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tasks.shuffle(&mut *rng);
    }
}

/// Leaves templates in the order storage returned them
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl Shuffler for InOrder {
    fn shuffle(&self, _tasks: &mut [Task]) {}
}
