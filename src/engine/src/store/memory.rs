use crate::store::{Entity, EntityStore};
use log::debug;
use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct MemoryStore<T: Entity> {
    records: RwLock<BTreeMap<u32, T>>,
    sequence: AtomicU32,
}

impl<T: Entity> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicU32::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Entity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityStore<T> for MemoryStore<T> {
    fn get(&self, id: u32) -> Option<T> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.get(&id).cloned()
    }

    fn exists(&self, id: u32) -> bool {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.contains_key(&id)
    }

    fn find_by(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.values().filter(|r| predicate(r)).cloned().collect()
    }

    fn save(&self, mut entity: T) -> T {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());

        if entity.id() == 0 {
            let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            entity.set_id(id);
            debug!("store: assigned id {}", id);
        } else {
            // keep the sequence ahead of externally chosen ids
            self.sequence.fetch_max(entity.id(), Ordering::SeqCst);
        }

        records.insert(entity.id(), entity.clone());

        entity
    }

    fn delete(&self, id: u32) -> bool {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.remove(&id).is_some()
    }

    fn list_all(&self) -> Vec<T> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.values().cloned().collect()
    }
}
