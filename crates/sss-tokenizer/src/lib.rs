//! Tokenizer for indentation-based style sheets.
//!
//! Produces a lossless token stream (every byte of the input belongs to
//! exactly one token) and a [`LineIndex`] that maps byte offsets to 1-based
//! line/column positions.

mod span;
pub use span::Span;

mod position;
pub use position::{LineIndex, Position};

mod token;
pub use token::{Token, TokenKind};

mod tokenizer;
pub use tokenizer::Tokenizer;

/// Tokenize the whole input.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).collect()
}
