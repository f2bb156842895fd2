//! Per-instance association cache.
//!
//! Each (instance, association) pair is either unfetched or cached. A cached
//! entry is returned as-is, including a cached remote failure, until the
//! caller asks for a reload. There is no expiry and no locking.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::ops::Fetched;

/// Memoized association results, keyed by association name.
#[derive(Debug, Clone, Default)]
pub struct AssociationCache {
    entries: HashMap<String, Fetched>,
}

impl AssociationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fetch is required to answer for `name`.
    pub fn needs_fetch(&self, name: &str, reload: bool) -> bool {
        reload || !self.entries.contains_key(name)
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Fetched> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Fetched> {
        self.entries.get_mut(name)
    }

    /// Store a freshly fetched value, moving the entry to the cached state.
    pub fn store(&mut self, name: &str, fetched: Fetched) -> &mut Fetched {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(fetched);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(fetched),
        }
    }

    /// Forget one entry.
    pub fn invalidate(&mut self, name: &str) -> Option<Fetched> {
        self.entries.remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
