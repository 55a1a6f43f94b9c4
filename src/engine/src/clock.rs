use chrono::{NaiveDateTime, Utc};
use std::sync::RwLock;

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    current: RwLock<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(current: NaiveDateTime) -> Self {
        FixedClock {
            current: RwLock::new(current),
        }
    }

    pub fn set(&self, value: NaiveDateTime) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = value;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
