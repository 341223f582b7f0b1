use crate::analysis::filter::TokenFilter;
use crate::analysis::stopwords::StopWords;
use crate::analysis::token::Token;

pub struct StopWordFilter {
    stop_words: StopWords,
}

impl StopWordFilter {
    pub fn new(stop_words: StopWords) -> Self {
        StopWordFilter { stop_words }
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }
}
