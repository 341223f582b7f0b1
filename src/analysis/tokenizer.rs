use crate::analysis::token::Token;

/// Splits text into tokens. Kept as a trait, as the teacher's analysis module
/// does, even though this crate ships a single implementation — it is the seam
/// a caller would extend at without touching the index.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Splits on ASCII space (0x20) only. No other whitespace is a delimiter, and
/// no Unicode word-boundary logic is applied — tokens are maximal non-empty
/// runs between spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split(' ')
            .filter(|word| !word.is_empty())
            .map(Token::new)
            .collect()
    }
}
