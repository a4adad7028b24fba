//! Key-value persistence seam for [`ProgressState`](crate::ProgressState).

use std::collections::HashMap;

use crate::error::Result;

/// Keys under which progress is persisted.
pub mod keys {
    pub const ONBOARDING: &str = "hasSeenOnboarding";
    pub const GOAL: &str = "screenTimeGoal";
    pub const POINTS: &str = "points";
}

/// A string key-value store.
///
/// Values are JSON text. Rewriting a value is idempotent; writes that must
/// land together go through [`StateStore::set_many`].
pub trait StateStore {
    /// Read the raw value for `key`, `None` if never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Insert or replace every pair as one unit: either all are written or
    /// none are.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()>;
}

/// Volatile store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.values.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<()> {
        (**self).set_many(entries)
    }
}
