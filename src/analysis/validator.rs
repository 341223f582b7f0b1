use crate::core::error::{Error, ErrorKind, Result};

/// A word is valid iff it contains no byte in `0x00..=0x1F`.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < 0x20)
}

pub fn validate_word(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidChar,
            format!("word contains a control character: {word:?}"),
        ))
    }
}
