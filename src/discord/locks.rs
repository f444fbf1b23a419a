use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async lock per user id, so a user's read-modify-write of their
/// rating never interleaves with another invocation for the same user.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub async fn lock(&self, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // nobody else holds or waits on these
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(user_id).or_default())
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
