use std::collections::BTreeSet;

use crate::analysis::stopwords::StopWords;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::core::error::{Error, ErrorKind, Result};

/// A parsed query, deduplicated: every plus/minus word appears at most once.
/// Built by `QueryParser::parse`, the entry point `Ranker::find_top` reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

/// Same shape but order-preserving and non-deduplicated, for callers that
/// need to walk the raw term sequence (the parallel matcher dedups its own
/// output instead, mirroring `MatchDocument`'s parallel overload).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    pub plus_words: Vec<String>,
    pub minus_words: Vec<String>,
}

pub struct QueryParser<'a> {
    stop_words: &'a StopWords,
}

impl<'a> QueryParser<'a> {
    pub fn new(stop_words: &'a StopWords) -> Self {
        QueryParser { stop_words }
    }

    fn split_term(term: &str) -> Result<(&str, bool)> {
        let Some(rest) = term.strip_prefix('-') else { return Ok((term, false)) };
        if rest.starts_with('-') {
            return Err(Error::new(
                ErrorKind::LeadingDoubleMinus,
                format!("query term {term:?} has more than one leading minus"),
            ));
        }
        if rest.is_empty() {
            return Err(Error::new(
                ErrorKind::EmptyMinusTerm,
                "query has a minus with no word following it".to_string(),
            ));
        }
        Ok((rest, true))
    }

    /// Parses a raw query into deduplicated plus/minus word sets, dropping
    /// stop-words. Every term is validated for control characters before the
    /// leading minus is interpreted.
    pub fn parse(&self, raw: &str) -> Result<Query> {
        let raw_query = self.parse_raw(raw)?;
        Ok(Query {
            plus_words: raw_query.plus_words.into_iter().collect(),
            minus_words: raw_query.minus_words.into_iter().collect(),
        })
    }

    /// Parses without deduplicating, preserving the original term order.
    pub fn parse_raw(&self, raw: &str) -> Result<RawQuery> {
        let mut query = RawQuery::default();
        for token in WhitespaceTokenizer.tokenize(raw) {
            crate::analysis::validator::validate_word(&token.text)?;
            let (word, is_minus) = Self::split_term(&token.text)?;
            if self.stop_words.contains(word) {
                continue;
            }
            if is_minus {
                query.minus_words.push(word.to_string());
            } else {
                query.plus_words.push(word.to_string());
            }
        }
        Ok(query)
    }
}
