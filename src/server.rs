use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::stopwords::StopWords;
use crate::analysis::validator::validate_word;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{compute_average_rating, DocId, DocRecord, Document, DocumentStatus};
use crate::index::doc_freqs::DocFreqIndex;
use crate::index::interner::Interner;
use crate::index::inverted::InvertedIndex;
use crate::index::store::DocumentStore;
use crate::query::matcher::Matcher;
use crate::query::parser::QueryParser;
use crate::scoring::ranker::Ranker;

/// Aggregates the tokenizer/validator pipeline, the interner, the two
/// co-maintained frequency indices, and the document store behind one
/// facade, modeled on the teacher's `Database` (a single struct holding
/// its subsystems, reads safe to run concurrently, writes exclusive).
pub struct Server {
    config: Config,
    stop_words: StopWords,
    analyzer: Analyzer,
    interner: Interner,
    index: RwLock<InvertedIndex>,
    doc_freqs: DocFreqIndex,
    store: DocumentStore,
}

impl Server {
    pub fn new<S: AsRef<str>>(config: Config, stop_words: &[S]) -> Result<Self> {
        let stop_words = StopWords::from_collection(stop_words.iter().map(|s| s.as_ref().to_string()))?;
        Self::with_stop_words(config, stop_words)
    }

    pub fn with_stop_words_text(config: Config, stop_words_text: &str) -> Result<Self> {
        let stop_words = StopWords::from_text(stop_words_text)?;
        Self::with_stop_words(config, stop_words)
    }

    fn with_stop_words(config: Config, stop_words: StopWords) -> Result<Self> {
        Ok(Server {
            config,
            analyzer: Analyzer::new(stop_words.clone()),
            stop_words,
            interner: Interner::new(),
            index: RwLock::new(InvertedIndex::new()),
            doc_freqs: DocFreqIndex::new(config.shard_count),
            store: DocumentStore::new(config.shard_count),
        })
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Fails `NegativeId`/`DuplicateId`/`InvalidChar` before mutating
    /// anything: the state is never partially updated by a failing call.
    pub fn add_document(
        &self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i64],
    ) -> Result<()> {
        if id < 0 {
            return Err(Error::new(ErrorKind::NegativeId, format!("document id {id} is negative")));
        }
        if self.store.contains(id) {
            return Err(Error::new(ErrorKind::DuplicateId, format!("document {id} already exists")));
        }

        let tokens = self.analyzer.tokenize(text);
        for token in &tokens {
            validate_word(&token.text)?;
        }
        let content = self.analyzer.filter_tokens(tokens);

        if !content.is_empty() {
            let inv_count = 1.0 / content.len() as f64;
            // Count by raw word first so each *distinct* word is interned
            // exactly once, keeping intern/release 1:1 with (word, doc)
            // entries even when the document repeats a word.
            let mut raw_counts: HashMap<&str, f64> = HashMap::new();
            for token in &content {
                *raw_counts.entry(token.text.as_str()).or_insert(0.0) += inv_count;
            }
            let mut word_freqs: HashMap<Arc<str>, f64> = HashMap::new();
            for (word, tf) in raw_counts {
                let interned = self.interner.intern(word);
                word_freqs.insert(interned, tf);
            }
            let mut index = self.index.write();
            for (word, tf) in word_freqs {
                index.record(word.clone(), id, tf);
                self.doc_freqs.record(id, word, tf);
            }
        }

        self.store.insert(id, DocRecord { rating: compute_average_rating(ratings), status });
        Ok(())
    }

    pub fn find_top_documents<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i64) -> bool,
    {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let index = self.index.read();
        let ranker = Ranker::new(&index, &self.store, self.config);
        Ok(ranker.find_top(&query, predicate))
    }

    pub fn find_top_documents_parallel<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i64) -> bool + Sync,
    {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        let index = self.index.read();
        let ranker = Ranker::new(&index, &self.store, self.config);
        Ok(ranker.find_top_parallel(&query, predicate))
    }

    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents(raw_query, move |_, doc_status, _| doc_status == status)
    }

    pub fn find_top_documents_default(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with_status(raw_query, DocumentStatus::Actual)
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let query = QueryParser::new(&self.stop_words).parse(raw_query)?;
        Matcher::new(&self.doc_freqs, &self.store).match_document(&query, id)
    }

    pub fn match_document_parallel(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = QueryParser::new(&self.stop_words).parse_raw(raw_query)?;
        Matcher::new(&self.doc_freqs, &self.store).match_document_parallel(&query, id)
    }

    pub fn document_count(&self) -> usize {
        self.store.len()
    }

    pub fn document_ids(&self) -> Vec<DocId> {
        self.store.ids()
    }

    pub fn get_document_id(&self, index: usize) -> Result<DocId> {
        self.store.get_document_id(index)
    }

    pub fn word_frequencies(&self, id: DocId) -> HashMap<String, f64> {
        self.doc_freqs
            .words_of(id)
            .map(|words| words.into_iter().map(|(word, tf)| (word.to_string(), tf)).collect())
            .unwrap_or_default()
    }

    /// No-op if `id` is not present, matching the original's silent-success
    /// policy for removing an unknown document.
    pub fn remove_document(&self, id: DocId) {
        let Some(words) = self.doc_freqs.remove(id) else { return };
        self.store.remove(id);
        let mut index = self.index.write();
        for word in words.keys() {
            index.remove(word, id);
            self.interner.release(word);
        }
    }

    /// Same result as `remove_document`, fanning the per-word cleanup out
    /// over `rayon` for documents with many distinct words.
    pub fn remove_document_parallel(&self, id: DocId) {
        let Some(words) = self.doc_freqs.remove(id) else { return };
        self.store.remove(id);
        let released: Vec<Arc<str>> = words.into_keys().collect();
        released.par_iter().for_each(|word| self.interner.release(word));
        let mut index = self.index.write();
        for word in &released {
            index.remove(word, id);
        }
    }
}
