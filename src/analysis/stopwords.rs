use std::collections::BTreeSet;

use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};
use crate::analysis::validator::validate_word;
use crate::core::error::Result;

/// An immutable, ordered set of stop-words. Any token equal to a stop-word is
/// dropped at ingestion and query time.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn empty() -> Self {
        StopWords { words: BTreeSet::new() }
    }

    /// Builds a stop-word set from an already-tokenized collection. Fails
    /// `InvalidChar` if any entry contains a control character.
    pub fn from_collection<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.into();
            if word.is_empty() {
                continue;
            }
            validate_word(&word)?;
            set.insert(word);
        }
        Ok(StopWords { words: set })
    }

    /// Builds a stop-word set by splitting free text on ASCII space, the same
    /// way document content is tokenized.
    pub fn from_text(text: &str) -> Result<Self> {
        let words = WhitespaceTokenizer.tokenize(text).into_iter().map(|t| t.text);
        Self::from_collection(words)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
