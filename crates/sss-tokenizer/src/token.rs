//! Token types for the style sheet tokenizer.

use crate::Span;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,

    // Content
    /// Any run of characters that is not punctuation, whitespace, a string or a comment.
    Word,
    /// `@name`, including the `@`.
    AtWord,
    /// Quoted string, `"..."` or `'...'`, including the quotes.
    String,

    // Comments
    /// `// ...` up to (not including) the line break.
    InlineComment,
    /// `/* ... */`, possibly spanning lines.
    BlockComment,

    // Whitespace
    /// Horizontal whitespace: spaces, tabs, form feeds.
    Space,
    /// `\n` or `\r\n`.
    Newline,

    /// Unterminated string or block comment. Runs to the end of input.
    Error,
}

impl TokenKind {
    /// Whether this token is whitespace.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Space | TokenKind::Newline)
    }

    /// Whether this token is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::InlineComment | TokenKind::BlockComment)
    }

    /// Whether this token is whitespace or a comment.
    pub fn is_trivia(&self) -> bool {
        self.is_whitespace() || self.is_comment()
    }
}

/// A token with its kind, span, and source text slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The span in the source text.
    pub span: Span,
    /// The source text of this token.
    pub text: &'src str,
}

impl<'src> Token<'src> {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: &'src str) -> Self {
        Self { kind, span, text }
    }

    /// Whether this token has the given kind.
    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
