use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::types::DocId;

/// Word → document → term-frequency. The primary view ranking reads from;
/// kept strictly consistent with `doc_freqs::DocFreqIndex`, its inverse, by
/// every mutation in `Server` (spec invariant I1).
#[derive(Default)]
pub struct InvertedIndex {
    postings: HashMap<Arc<str>, BTreeMap<DocId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex { postings: HashMap::new() }
    }

    /// Records that `doc` contains `word` with term-frequency `tf`.
    pub fn record(&mut self, word: Arc<str>, doc: DocId, tf: f64) {
        self.postings.entry(word).or_default().insert(doc, tf);
    }

    /// Removes `doc` from `word`'s posting list. Returns `true` if the word's
    /// posting list became empty and was eagerly removed (spec invariant I3).
    pub fn remove(&mut self, word: &str, doc: DocId) -> bool {
        let Some(postings) = self.postings.get_mut(word) else { return false };
        postings.remove(&doc);
        if postings.is_empty() {
            self.postings.remove(word);
            true
        } else {
            false
        }
    }

    pub fn postings_for(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.postings.get(word)
    }

    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings.get(word).map_or(0, |m| m.len())
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.postings.contains_key(word)
    }

    /// `idf(w) = ln(N / df(w))`. Callers must not invoke this for a word
    /// absent from the index or when `N == 0`.
    pub fn inverse_document_frequency(&self, word: &str, total_docs: usize) -> f64 {
        let df = self.document_frequency(word);
        (total_docs as f64 / df as f64).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_remove_keep_postings_consistent() {
        let mut index = InvertedIndex::new();
        let word: Arc<str> = Arc::from("cat");
        index.record(word.clone(), 1, 0.5);
        index.record(word.clone(), 2, 0.25);
        assert_eq!(index.document_frequency("cat"), 2);

        let emptied = index.remove("cat", 1);
        assert!(!emptied);
        assert_eq!(index.document_frequency("cat"), 1);

        let emptied = index.remove("cat", 2);
        assert!(emptied);
        assert!(!index.contains_word("cat"));
    }

    #[test]
    fn idf_matches_the_natural_log_formula() {
        let mut index = InvertedIndex::new();
        let word: Arc<str> = Arc::from("cat");
        index.record(word, 1, 1.0);
        let idf = index.inverse_document_frequency("cat", 4);
        assert!((idf - (4.0_f64 / 1.0).ln()).abs() < 1e-12);
    }
}
