//! Tokenizer for indentation-based style sheets.

use crate::{Span, Token, TokenKind};
use tracing::trace;

/// A tokenizer that produces tokens from style sheet source text.
///
/// Tokens cover the input without gaps, so concatenating the text of every
/// token reproduces the source exactly.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,
    /// Open parentheses. `//` inside parentheses is not a comment (`url(http://...)`).
    depth: u32,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
            depth: 0,
        }
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Peek at the nth character (0-indexed) without consuming.
    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    /// Advance by one character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        Some(c)
    }

    /// Advance by n bytes.
    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.pos += n as u32;
        self.remaining = &self.remaining[n..];
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Whether the remaining text starts a comment.
    fn at_comment(&self) -> bool {
        self.starts_with("/*") || (self.depth == 0 && self.starts_with("//"))
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = &self.source[start as usize..self.pos as usize];
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    /// Get the next token, or `None` at the end of input.
    pub fn next_token(&mut self) -> Option<Token<'src>> {
        let start = self.pos;
        let c = self.peek()?;

        let token = match c {
            ':' | ';' | ',' | '{' | '}' => {
                self.advance();
                let kind = match c {
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semicolon,
                    ',' => TokenKind::Comma,
                    '{' => TokenKind::LBrace,
                    _ => TokenKind::RBrace,
                };
                self.token(kind, start)
            }
            '(' => {
                self.advance();
                self.depth += 1;
                self.token(TokenKind::LParen, start)
            }
            ')' => {
                self.advance();
                self.depth = self.depth.saturating_sub(1);
                self.token(TokenKind::RParen, start)
            }

            '\n' => {
                self.advance();
                self.token(TokenKind::Newline, start)
            }
            '\r' if self.peek_nth(1) == Some('\n') => {
                self.advance_by(2);
                self.token(TokenKind::Newline, start)
            }
            ' ' | '\t' | '\u{c}' | '\r' => self.tokenize_space(),

            '"' | '\'' => self.tokenize_string(c),
            '/' if self.starts_with("/*") => self.tokenize_block_comment(),
            '/' if self.depth == 0 && self.starts_with("//") => self.tokenize_inline_comment(),
            '@' => self.tokenize_at_word(),
            _ => self.tokenize_word(),
        };
        Some(token)
    }

    /// Tokenize horizontal whitespace. A `\r` not followed by `\n` counts as space.
    fn tokenize_space(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\u{c}' => {
                    self.advance();
                }
                '\r' if self.peek_nth(1) != Some('\n') => {
                    self.advance();
                }
                _ => break,
            }
        }
        self.token(TokenKind::Space, start)
    }

    /// Tokenize a quoted string, honouring backslash escapes.
    fn tokenize_string(&mut self, quote: char) -> Token<'src> {
        let start = self.pos;
        self.advance();

        loop {
            match self.advance() {
                None => return self.token(TokenKind::Error, start),
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => break,
                Some(_) => {}
            }
        }

        self.token(TokenKind::String, start)
    }

    /// Tokenize `/* ... */`.
    fn tokenize_block_comment(&mut self) -> Token<'src> {
        let start = self.pos;
        match self.remaining[2..].find("*/") {
            Some(end) => {
                self.advance_by(end + 4);
                self.token(TokenKind::BlockComment, start)
            }
            None => {
                self.advance_by(self.remaining.len());
                self.token(TokenKind::Error, start)
            }
        }
    }

    /// Tokenize `// ...` up to the end of the line.
    fn tokenize_inline_comment(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '\n' || (c == '\r' && self.peek_nth(1) == Some('\n')) {
                break;
            }
            self.advance();
        }
        self.token(TokenKind::InlineComment, start)
    }

    /// Tokenize `@name`.
    fn tokenize_at_word(&mut self) -> Token<'src> {
        let start = self.pos;
        self.advance();
        while let Some(c) = self.peek() {
            if is_at_word_end(c) {
                break;
            }
            self.advance();
        }
        self.token(TokenKind::AtWord, start)
    }

    /// Tokenize a word. The first character is always consumed.
    fn tokenize_word(&mut self) -> Token<'src> {
        let start = self.pos;
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
                None => break,
            }
            match self.peek() {
                Some(c) if is_word_end(c) => break,
                Some('/') if self.at_comment() => break,
                Some(_) => {}
                None => break,
            }
        }
        self.token(TokenKind::Word, start)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Characters that end a word.
fn is_word_end(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\u{c}' | ':' | ';' | ',' | '{' | '}' | '(' | ')' | '"' | '\''
    )
}

/// Characters that end an at-word.
fn is_at_word_end(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t' | '\n' | '\r' | '\u{c}' | ';' | '{' | '}' | '(' | ')' | '"' | '\'' | '/' | '\\'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(source: &str) -> Vec<(TokenKind, &str)> {
        Tokenizer::new(source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(tokenize(":"), vec![(TokenKind::Colon, ":")]);
        assert_eq!(tokenize(";"), vec![(TokenKind::Semicolon, ";")]);
        assert_eq!(tokenize(","), vec![(TokenKind::Comma, ",")]);
        assert_eq!(tokenize("{"), vec![(TokenKind::LBrace, "{")]);
        assert_eq!(tokenize("}"), vec![(TokenKind::RBrace, "}")]);
        assert_eq!(tokenize("("), vec![(TokenKind::LParen, "(")]);
        assert_eq!(tokenize(")"), vec![(TokenKind::RParen, ")")]);
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            tokenize("color: black"),
            vec![
                (TokenKind::Word, "color"),
                (TokenKind::Colon, ":"),
                (TokenKind::Space, " "),
                (TokenKind::Word, "black"),
            ]
        );
    }

    #[test]
    fn test_pseudo_class_splits_on_colon() {
        assert_eq!(
            tokenize("a:hover"),
            vec![
                (TokenKind::Word, "a"),
                (TokenKind::Colon, ":"),
                (TokenKind::Word, "hover"),
            ]
        );
    }

    #[test]
    fn test_at_word() {
        assert_eq!(
            tokenize("@media  s"),
            vec![
                (TokenKind::AtWord, "@media"),
                (TokenKind::Space, "  "),
                (TokenKind::Word, "s"),
            ]
        );
        assert_eq!(tokenize("@"), vec![(TokenKind::AtWord, "@")]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            tokenize(r#""UTF-8";"#),
            vec![(TokenKind::String, r#""UTF-8""#), (TokenKind::Semicolon, ";")]
        );
        assert_eq!(
            tokenize(r#"'it\'s'"#),
            vec![(TokenKind::String, r#"'it\'s'"#)]
        );
        assert_eq!(tokenize("\"open"), vec![(TokenKind::Error, "\"open")]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tokenize("//  a \nb"),
            vec![
                (TokenKind::InlineComment, "//  a "),
                (TokenKind::Newline, "\n"),
                (TokenKind::Word, "b"),
            ]
        );
        assert_eq!(
            tokenize("/* a\n b */"),
            vec![(TokenKind::BlockComment, "/* a\n b */")]
        );
        assert_eq!(tokenize("/* open"), vec![(TokenKind::Error, "/* open")]);
    }

    #[test]
    fn test_comment_ends_word() {
        assert_eq!(
            tokenize("black// note"),
            vec![
                (TokenKind::Word, "black"),
                (TokenKind::InlineComment, "// note"),
            ]
        );
    }

    #[test]
    fn test_double_slash_inside_parens() {
        assert_eq!(
            tokenize("url(http://x.y/a)"),
            vec![
                (TokenKind::Word, "url"),
                (TokenKind::LParen, "("),
                (TokenKind::Word, "http"),
                (TokenKind::Colon, ":"),
                (TokenKind::Word, "//x.y/a"),
                (TokenKind::RParen, ")"),
            ]
        );
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(tokenize("  \t"), vec![(TokenKind::Space, "  \t")]);
        assert_eq!(tokenize("\n"), vec![(TokenKind::Newline, "\n")]);
        assert_eq!(tokenize("\r\n"), vec![(TokenKind::Newline, "\r\n")]);
        assert_eq!(
            tokenize(" \r\n"),
            vec![(TokenKind::Space, " "), (TokenKind::Newline, "\r\n")]
        );
    }

    #[test]
    fn test_escape_in_word() {
        assert_eq!(
            tokenize(r"a\:b c"),
            vec![
                (TokenKind::Word, r"a\:b"),
                (TokenKind::Space, " "),
                (TokenKind::Word, "c"),
            ]
        );
    }

    #[test]
    fn test_lossless() {
        let source = "@media (screen) {\n  a , b:hover\n    color: red; // x\n\t/* y */ \r\n";
        let joined: String = Tokenizer::new(source).map(|t| t.text).collect();
        assert_eq!(joined, source);
    }

    #[test]
    fn test_token_dump() {
        let dump: Vec<String> = Tokenizer::new("a\n  b: 1")
            .map(|t| format!("{:?} {}..{}", t.kind, t.span.start, t.span.end))
            .collect();
        insta::assert_snapshot!(dump.join("\n"), @r"
        Word 0..1
        Newline 1..2
        Space 2..4
        Word 4..5
        Colon 5..6
        Space 6..7
        Word 7..8
        ");
    }
}
