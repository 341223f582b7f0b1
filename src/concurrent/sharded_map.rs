use std::collections::BTreeMap;

use parking_lot::{Mutex, MutexGuard};

use crate::core::types::DocId;

/// An N-way striped ordered map keyed by document id. Rank accumulation over
/// many words against the same set of document ids would otherwise contend on
/// a single lock; striping by `key mod shard_count` keeps critical sections
/// short. Ported from the original `ConcurrentMap<Key, Value>` template, with
/// one correction: `erase` here locks its shard before removing (the original
/// C++ `Erase` does not, a bug this port does not reproduce).
pub struct ShardedMap<V> {
    shards: Vec<Mutex<BTreeMap<DocId, V>>>,
}

/// A scoped handle holding the shard's lock for as long as it lives. Callers
/// should keep its scope minimal; the lock releases on drop regardless of how
/// the scope is exited.
pub struct Access<'a, V> {
    guard: MutexGuard<'a, BTreeMap<DocId, V>>,
    key: DocId,
}

impl<'a, V: Default> Access<'a, V> {
    pub fn value(&mut self) -> &mut V {
        self.guard.entry(self.key).or_default()
    }
}

impl<V> ShardedMap<V> {
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        let mut shards = Vec::with_capacity(shard_count);
        shards.resize_with(shard_count, || Mutex::new(BTreeMap::new()));
        ShardedMap { shards }
    }

    fn shard_index(&self, key: DocId) -> usize {
        (key.rem_euclid(self.shards.len() as i64)) as usize
    }

    /// Acquires the shard's exclusive lock and returns a handle over the
    /// value slot, creating a default-initialized slot if absent.
    pub fn access(&self, key: DocId) -> Access<'_, V>
    where
        V: Default,
    {
        let index = self.shard_index(key);
        Access { guard: self.shards[index].lock(), key }
    }

    /// Removes the entry for `key`, returning the number of entries removed
    /// (0 or 1).
    pub fn erase(&self, key: DocId) -> usize {
        let index = self.shard_index(key);
        let mut shard = self.shards[index].lock();
        if shard.remove(&key).is_some() { 1 } else { 0 }
    }

    pub fn get(&self, key: DocId) -> Option<V>
    where
        V: Clone,
    {
        let index = self.shard_index(key);
        self.shards[index].lock().get(&key).cloned()
    }

    pub fn insert(&self, key: DocId, value: V) {
        let index = self.shard_index(key);
        self.shards[index].lock().insert(key, value);
    }

    pub fn contains(&self, key: DocId) -> bool {
        let index = self.shard_index(key);
        self.shards[index].lock().contains_key(&key)
    }

    /// Acquires each shard in turn and merges all entries into a single
    /// ordered snapshot. Keys never collide across shards because of the
    /// shard function.
    pub fn flatten(&self) -> BTreeMap<DocId, V>
    where
        V: Clone,
    {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            let guard = shard.lock();
            result.extend(guard.iter().map(|(k, v)| (*k, v.clone())));
        }
        result
    }

    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
