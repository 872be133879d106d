//! Per-item request generations.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Tracks the latest request issued per key so older responses can be dropped.
///
/// Generations come from one counter shared by all keys, so a key that is
/// forgotten and tracked again never reuses a number still in flight.
#[derive(Debug)]
pub(crate) struct Generations<K> {
    issued: u64,
    latest: FxHashMap<K, u64>,
}

impl<K> Default for Generations<K> {
    fn default() -> Self {
        Self {
            issued: 0,
            latest: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash> Generations<K> {
    /// Record a new request for `key` and return its generation.
    pub(crate) fn begin(&mut self, key: K) -> u64 {
        self.issued += 1;
        self.latest.insert(key, self.issued);

        self.issued
    }

    /// Forget keys that no longer need tracking.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.latest.retain(|key, _| keep(key));
    }

    /// Number of keys tracked.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.latest.len()
    }

    /// Whether `generation` is still the newest request for `key`.
    pub(crate) fn is_current(&self, key: &K, generation: u64) -> bool {
        self.latest.get(key) == Some(&generation)
    }
}
