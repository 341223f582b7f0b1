use rayon::prelude::*;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, DocumentStatus};
use crate::index::doc_freqs::DocFreqIndex;
use crate::index::store::DocumentStore;
use crate::query::parser::{Query, RawQuery};

/// Matches a query against a single document: which of its plus-words occur
/// in the document, short-circuiting to an empty match if any minus-word
/// does. Ported from `MatchDocument`'s two overloads.
pub struct Matcher<'a> {
    doc_freqs: &'a DocFreqIndex,
    store: &'a DocumentStore,
}

impl<'a> Matcher<'a> {
    pub fn new(doc_freqs: &'a DocFreqIndex, store: &'a DocumentStore) -> Self {
        Matcher { doc_freqs, store }
    }

    fn status_of(&self, doc_id: DocId) -> Result<DocumentStatus> {
        self.store.get(doc_id).map(|record| record.status).ok_or_else(|| {
            Error::new(ErrorKind::UnknownDocument, format!("no document with id {doc_id}"))
        })
    }

    /// Sequential match: any minus-word present empties the result.
    pub fn match_document(&self, query: &Query, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.status_of(doc_id)?;
        let words = self.doc_freqs.words_of(doc_id).unwrap_or_default();

        if query.minus_words.iter().any(|word| words.contains_key(word.as_str())) {
            return Ok((Vec::new(), status));
        }

        let mut matched: Vec<String> = query
            .plus_words
            .iter()
            .filter(|word| words.contains_key(word.as_str()))
            .cloned()
            .collect();
        matched.sort();
        Ok((matched, status))
    }

    /// Parallel match, fanning the minus/plus checks out over `rayon`. Takes
    /// the order-preserving, non-deduplicated `RawQuery` (spec.md §4.4's
    /// "ordered-sequence variant for parallel matching without dedup") and
    /// dedups its own output afterward. Same result as the sequential path;
    /// the concurrency only pays off against queries with many terms.
    pub fn match_document_parallel(
        &self,
        query: &RawQuery,
        doc_id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.status_of(doc_id)?;
        let words = self.doc_freqs.words_of(doc_id).unwrap_or_default();

        let any_minus = query
            .minus_words
            .par_iter()
            .any(|word| words.contains_key(word.as_str()));
        if any_minus {
            return Ok((Vec::new(), status));
        }

        let mut matched: Vec<String> = query
            .plus_words
            .par_iter()
            .filter(|word| words.contains_key(word.as_str()))
            .cloned()
            .collect();
        matched.sort();
        matched.dedup();
        Ok((matched, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocRecord;
    use std::sync::Arc;

    fn setup() -> (DocFreqIndex, DocumentStore) {
        let doc_freqs = DocFreqIndex::new(4);
        let store = DocumentStore::new(4);
        store.insert(1, DocRecord { rating: 3, status: DocumentStatus::Actual });
        doc_freqs.record(1, Arc::from("cat"), 0.5);
        doc_freqs.record(1, Arc::from("city"), 0.5);
        (doc_freqs, store)
    }

    fn query(plus: &[&str], minus: &[&str]) -> Query {
        Query {
            plus_words: plus.iter().map(|s| s.to_string()).collect(),
            minus_words: minus.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn raw_query(plus: &[&str], minus: &[&str]) -> RawQuery {
        RawQuery {
            plus_words: plus.iter().map(|s| s.to_string()).collect(),
            minus_words: minus.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn matches_plus_words_present_in_the_document() {
        let (doc_freqs, store) = setup();
        let matcher = Matcher::new(&doc_freqs, &store);
        let (matched, status) = matcher.match_document(&query(&["cat", "dog"], &[]), 1).unwrap();
        assert_eq!(matched, vec!["cat"]);
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn a_present_minus_word_empties_the_match() {
        let (doc_freqs, store) = setup();
        let matcher = Matcher::new(&doc_freqs, &store);
        let (matched, _) = matcher.match_document(&query(&["cat"], &["city"]), 1).unwrap();
        assert!(matched.is_empty());
    }

    #[test]
    fn parallel_path_agrees_with_sequential() {
        let (doc_freqs, store) = setup();
        let matcher = Matcher::new(&doc_freqs, &store);
        let q = query(&["cat", "city"], &[]);
        let raw = raw_query(&["cat", "city"], &[]);
        let (seq, _) = matcher.match_document(&q, 1).unwrap();
        let (par, _) = matcher.match_document_parallel(&raw, 1).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn parallel_path_dedups_a_repeated_raw_term() {
        let (doc_freqs, store) = setup();
        let matcher = Matcher::new(&doc_freqs, &store);
        let raw = raw_query(&["cat", "cat", "dog"], &[]);
        let (matched, _) = matcher.match_document_parallel(&raw, 1).unwrap();
        assert_eq!(matched, vec!["cat"]);
    }

    #[test]
    fn unknown_document_is_an_error() {
        let (doc_freqs, store) = setup();
        let matcher = Matcher::new(&doc_freqs, &store);
        let err = matcher.match_document(&query(&["cat"], &[]), 99).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownDocument);
    }
}
