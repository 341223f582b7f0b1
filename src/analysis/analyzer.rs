use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::stopwords::StopWords;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{Tokenizer, WhitespaceTokenizer};

/// Ties the tokenizer to the stop-word filter, the same pipeline shape as the
/// teacher's `Analyzer` (tokenizer + a chain of filters) stripped down to the
/// single filter this crate's spec calls for.
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl Analyzer {
    pub fn new(stop_words: StopWords) -> Self {
        Analyzer {
            tokenizer: Box::new(WhitespaceTokenizer),
            filters: vec![Box::new(StopWordFilter::new(stop_words))],
        }
    }

    /// Just the tokenizing stage, exposed so callers that need to validate
    /// every raw token (stop-words included) before filtering can do so
    /// without tokenizing twice.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.tokenizer.tokenize(text)
    }

    /// Runs the filter chain over an already-tokenized sequence.
    pub fn filter_tokens(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        self.filter_tokens(self.tokenize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stop_words_after_tokenizing() {
        let analyzer = Analyzer::new(StopWords::from_text("in the").unwrap());
        let tokens: Vec<String> = analyzer
            .analyze("cat in the city")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(tokens, vec!["cat", "city"]);
    }
}
