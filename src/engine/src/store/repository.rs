use crate::club::{Player, Team, Venue};
use crate::league::Standing;
use crate::r#match::Match;
use crate::store::MemoryStore;
use std::sync::Arc;

pub trait Entity: Clone + Send + Sync {
    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

/// Key-based storage for one record type.
///
/// Only single-record operations are atomic; anything spanning several
/// records has to be serialized by the caller.
pub trait EntityStore<T: Entity>: Send + Sync {
    fn get(&self, id: u32) -> Option<T>;

    fn exists(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    fn find_by(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T>;

    /// Stores the entity, assigning a fresh id when it has none (id 0).
    fn save(&self, entity: T) -> T;

    fn delete(&self, id: u32) -> bool;

    /// All records in ascending id order.
    fn list_all(&self) -> Vec<T>;

    fn find_first(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.find_by(predicate).into_iter().next()
    }
}

#[derive(Clone)]
pub struct Repositories {
    pub teams: Arc<dyn EntityStore<Team>>,
    pub venues: Arc<dyn EntityStore<Venue>>,
    pub matches: Arc<dyn EntityStore<Match>>,
    pub standings: Arc<dyn EntityStore<Standing>>,
    pub players: Arc<dyn EntityStore<Player>>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Repositories {
            teams: Arc::new(MemoryStore::<Team>::new()),
            venues: Arc::new(MemoryStore::<Venue>::new()),
            matches: Arc::new(MemoryStore::<Match>::new()),
            standings: Arc::new(MemoryStore::<Standing>::new()),
            players: Arc::new(MemoryStore::<Player>::new()),
        }
    }
}
