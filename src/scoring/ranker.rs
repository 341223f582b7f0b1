use std::collections::HashMap;

use rayon::prelude::*;

use crate::concurrent::sharded_map::ShardedMap;
use crate::core::config::Config;
use crate::core::types::{DocId, Document, DocumentStatus};
use crate::index::inverted::InvertedIndex;
use crate::index::store::DocumentStore;
use crate::query::parser::Query;

/// Accumulates TF-IDF relevance for a query's plus-words, drops documents hit
/// by a minus-word, applies the caller's predicate, and returns the top-K by
/// relevance (rating as the tie-break within `epsilon`). Ported from
/// `FindAllDocuments`'s sequential and parallel-policy overloads.
pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    store: &'a DocumentStore,
    config: Config,
}

impl<'a> Ranker<'a> {
    pub fn new(index: &'a InvertedIndex, store: &'a DocumentStore, config: Config) -> Self {
        Ranker { index, store, config }
    }

    fn total_docs(&self) -> usize {
        self.store.len()
    }

    fn compare(epsilon: f64, lhs: &Document, rhs: &Document) -> std::cmp::Ordering {
        if (lhs.relevance - rhs.relevance).abs() < epsilon {
            rhs.rating.cmp(&lhs.rating)
        } else {
            rhs.relevance.partial_cmp(&lhs.relevance).unwrap()
        }
    }

    fn rank_and_truncate(&self, mut docs: Vec<Document>) -> Vec<Document> {
        let epsilon = self.config.epsilon;
        docs.sort_by(|lhs, rhs| Self::compare(epsilon, lhs, rhs));
        docs.truncate(self.config.max_results);
        docs
    }

    /// Same ordering as `rank_and_truncate`, sorted in parallel (spec.md
    /// §4.5: the parallel variant's candidate list is "sorted in parallel").
    fn rank_and_truncate_parallel(&self, mut docs: Vec<Document>) -> Vec<Document> {
        let epsilon = self.config.epsilon;
        docs.par_sort_by(|lhs, rhs| Self::compare(epsilon, lhs, rhs));
        docs.truncate(self.config.max_results);
        docs
    }

    /// Sequential top-K search. `predicate` receives `(id, status, rating)`.
    pub fn find_top<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i64) -> bool,
    {
        let total_docs = self.total_docs();
        let mut relevance: HashMap<DocId, f64> = HashMap::new();

        for word in &query.plus_words {
            let Some(postings) = self.index.postings_for(word) else { continue };
            let idf = self.index.inverse_document_frequency(word, total_docs);
            for (&doc_id, &tf) in postings {
                let Some(record) = self.store.get(doc_id) else { continue };
                if predicate(doc_id, record.status, record.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
                }
            }
        }

        for word in &query.minus_words {
            let Some(postings) = self.index.postings_for(word) else { continue };
            for doc_id in postings.keys() {
                relevance.remove(doc_id);
            }
        }

        let docs = relevance
            .into_iter()
            .map(|(id, relevance)| Document { id, relevance, rating: self.store.get(id).unwrap().rating })
            .collect();
        self.rank_and_truncate(docs)
    }

    /// Parallel top-K search, fanning word processing out over `rayon` and
    /// accumulating relevance in a `ShardedMap` striped by document id
    /// (spec's "bucket count ~ 100" sizing, matched by `Config::shard_count`).
    pub fn find_top_parallel<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i64) -> bool + Sync,
    {
        let total_docs = self.total_docs();
        let relevance: ShardedMap<f64> = ShardedMap::new(self.config.shard_count);

        query.plus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings_for(word) else { return };
            let idf = self.index.inverse_document_frequency(word, total_docs);
            for (&doc_id, &tf) in postings {
                let Some(record) = self.store.get(doc_id) else { continue };
                if predicate(doc_id, record.status, record.rating) {
                    *relevance.access(doc_id).value() += tf * idf;
                }
            }
        });

        query.minus_words.par_iter().for_each(|word| {
            let Some(postings) = self.index.postings_for(word) else { return };
            for &doc_id in postings.keys() {
                relevance.erase(doc_id);
            }
        });

        let docs = relevance
            .flatten()
            .into_iter()
            .map(|(id, relevance)| Document { id, relevance, rating: self.store.get(id).unwrap().rating })
            .collect();
        self.rank_and_truncate_parallel(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DocRecord;
    use std::sync::Arc;

    fn build() -> (InvertedIndex, DocumentStore) {
        let mut index = InvertedIndex::new();
        let store = DocumentStore::new(4);

        store.insert(1, DocRecord { rating: 5, status: DocumentStatus::Actual });
        store.insert(2, DocRecord { rating: 0, status: DocumentStatus::Actual });
        store.insert(3, DocRecord { rating: -1, status: DocumentStatus::Banned });

        let cat: Arc<str> = Arc::from("cat");
        index.record(cat.clone(), 1, 0.5);
        index.record(cat, 2, 0.25);
        let dog: Arc<str> = Arc::from("dog");
        index.record(dog, 3, 1.0);

        (index, store)
    }

    #[test]
    fn ranks_by_relevance_descending() {
        let (index, store) = build();
        let config = Config::default();
        let ranker = Ranker::new(&index, &store, config);
        let query = Query { plus_words: ["cat"].into_iter().map(String::from).collect(), minus_words: Default::default() };
        let docs = ranker.find_top(&query, |_, status, _| status == DocumentStatus::Actual);
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, 1);
        assert_eq!(docs[1].id, 2);
    }

    #[test]
    fn minus_words_exclude_matching_documents() {
        let (index, store) = build();
        let config = Config::default();
        let ranker = Ranker::new(&index, &store, config);
        let query = Query {
            plus_words: ["cat"].into_iter().map(String::from).collect(),
            minus_words: ["dog"].into_iter().map(String::from).collect(),
        };
        let docs = ranker.find_top(&query, |_, _, _| true);
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn sequential_and_parallel_paths_agree() {
        let (index, store) = build();
        let config = Config::default();
        let ranker = Ranker::new(&index, &store, config);
        let query = Query { plus_words: ["cat"].into_iter().map(String::from).collect(), minus_words: Default::default() };
        let seq = ranker.find_top(&query, |_, _, _| true);
        let par = ranker.find_top_parallel(&query, |_, _, _| true);
        assert_eq!(seq, par);
    }
}
