use std::{
    collections::{hash_set::Iter, HashSet},
    hash::Hash,
};

// Device

/// Networking capability of an entity. Caches the holders whose lists
/// currently contain it, so destroying the device only has to visit those.
pub(crate) struct Device<E: Copy + Eq + Hash> {
    lists_cache: HashSet<E>,
}

impl<E: Copy + Eq + Hash> Device<E> {
    pub(crate) fn new() -> Self {
        Self {
            lists_cache: HashSet::new(),
        }
    }

    // Device Lists

    pub(crate) fn cache_list(&mut self, holder: &E) {
        self.lists_cache.insert(*holder);
    }

    pub(crate) fn uncache_list(&mut self, holder: &E) {
        self.lists_cache.remove(holder);
    }

    pub(crate) fn has_list(&self, holder: &E) -> bool {
        self.lists_cache.contains(holder)
    }

    pub(crate) fn list_holders(&self) -> Iter<'_, E> {
        self.lists_cache.iter()
    }

    pub(crate) fn list_count(&self) -> usize {
        self.lists_cache.len()
    }
}
