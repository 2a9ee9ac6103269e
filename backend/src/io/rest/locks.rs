use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per minion.
///
/// Updating a minion's assignments reads what exists and then inserts what is
/// missing, so two overlapping requests for the same minion would hand out
/// the same day twice. Handlers that touch a minion's assignments hold that
/// minion's lock for the whole request.
#[derive(Clone, Default)]
pub struct MinionLocks {
    locks: Arc<Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>>,
}

impl MinionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until no other request works on this minion
    pub async fn lock(&self, minion_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            // holders and waiters keep a clone, so a count of 1 means idle
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(minion_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}
