//! Per-key async mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

type Slot = Arc<tokio::sync::Mutex<()>>;

struct Entry {
    mutex: Slot,
    /// Holders plus waiters, including cancelled waiters not yet dropped.
    users: usize,
}

/// A set of async mutexes indexed by string key.
///
/// Tasks locking the same key are serialized; different keys never contend.
/// A key's slot is dropped once its last holder or waiter goes away, whether
/// it released the lock or was cancelled while waiting, so the map only holds
/// keys that are currently in use.
#[derive(Default)]
pub struct KeyedLock {
    slots: Mutex<HashMap<String, Entry>>,
}

/// Holds the lock for one key until dropped.
pub struct KeyedGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _usage: SlotUsage<'a>,
}

/// Registration of one holder or waiter on a key.
struct SlotUsage<'a> {
    owner: &'a KeyedLock,
    key: String,
}

impl KeyedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds `key`, then takes it.
    ///
    /// Dropping the returned future before it completes releases the key's slot.
    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        let (usage, mutex) = self.register(key);

        let guard = mutex.lock_owned().await;

        KeyedGuard {
            _guard: guard,
            _usage: usage,
        }
    }

    /// Number of keys currently held or awaited.
    pub fn active_keys(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn register(&self, key: &str) -> (SlotUsage<'_>, Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = slots.entry(key.to_string()).or_insert_with(|| Entry {
            mutex: Slot::default(),
            users: 0,
        });
        entry.users += 1;

        let usage = SlotUsage {
            owner: self,
            key: key.to_string(),
        };
        (usage, entry.mutex.clone())
    }
}

impl Drop for SlotUsage<'_> {
    fn drop(&mut self) {
        let mut slots = self
            .owner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let idle = match slots.get_mut(&self.key) {
            Some(entry) => {
                entry.users = entry.users.saturating_sub(1);
                entry.users == 0
            }
            None => false,
        };
        if idle {
            slots.remove(&self.key);
        }
    }
}
