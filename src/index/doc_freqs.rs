use std::collections::HashMap;
use std::sync::Arc;

use crate::concurrent::sharded_map::ShardedMap;
use crate::core::types::DocId;

/// Document → word → term-frequency, the inverse view of `inverted::InvertedIndex`.
/// Sharded by document id since every read site (`match_document`, duplicate
/// detection, `remove_document`) looks up a single document's full word set.
pub struct DocFreqIndex {
    docs: ShardedMap<HashMap<Arc<str>, f64>>,
}

impl DocFreqIndex {
    pub fn new(shard_count: usize) -> Self {
        DocFreqIndex { docs: ShardedMap::new(shard_count) }
    }

    pub fn record(&self, doc: DocId, word: Arc<str>, tf: f64) {
        self.docs.access(doc).value().insert(word, tf);
    }

    pub fn words_of(&self, doc: DocId) -> Option<HashMap<Arc<str>, f64>> {
        self.docs.get(doc)
    }

    pub fn contains(&self, doc: DocId) -> bool {
        self.docs.contains(doc)
    }

    pub fn remove(&self, doc: DocId) -> Option<HashMap<Arc<str>, f64>> {
        let words = self.docs.get(doc);
        self.docs.erase(doc);
        words
    }
}
