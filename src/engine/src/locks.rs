use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One mutex per key, created on first use.
#[derive(Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<u32, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        KeyedLocks::default()
    }

    pub fn lock_for(&self, key: u32) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(key).or_default())
    }

    pub fn forget(&self, key: u32) {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
