use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Owns the canonical copy of every distinct word referenced by at least one
/// (word, document) entry in the index. `intern` returns a stable, cheaply
/// cloned `Arc<str>` that all index maps key by; `release` drops the
/// reference count and evicts the entry once no occurrence references it
/// anymore. A sorted set backs it, so it always holds exactly the words
/// appearing in at least one entry, never more.
#[derive(Default)]
pub struct Interner {
    words: Mutex<BTreeMap<Arc<str>, usize>>,
}

impl Interner {
    pub fn new() -> Self {
        Interner { words: Mutex::new(BTreeMap::new()) }
    }

    /// Returns the canonical `Arc<str>` for `word`, bumping its refcount.
    pub fn intern(&self, word: &str) -> Arc<str> {
        let mut words = self.words.lock();
        if let Some(key) = words.get_key_value(word).map(|(k, _)| k.clone()) {
            *words.get_mut(&key).unwrap() += 1;
            return key;
        }
        let key: Arc<str> = Arc::from(word);
        words.insert(key.clone(), 1);
        key
    }

    /// Decrements `word`'s refcount and evicts it once it reaches zero.
    /// Callers are expected to call this exactly once per occurrence removed
    /// (mirroring the single `intern` call made when that occurrence was
    /// added).
    pub fn release(&self, word: &str) {
        let mut words = self.words.lock();
        if let Some(count) = words.get_mut(word) {
            *count -= 1;
            if *count == 0 {
                words.remove(word);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.words.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.lock().contains_key(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_stable_reference_for_repeat_calls() {
        let interner = Interner::new();
        let a = interner.intern("cat");
        let b = interner.intern("cat");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn release_evicts_only_once_refcount_hits_zero() {
        let interner = Interner::new();
        interner.intern("cat");
        interner.intern("cat");
        interner.release("cat");
        assert!(interner.contains("cat"));
        interner.release("cat");
        assert!(!interner.contains("cat"));
    }
}
