//! Splitting the token stream into physical lines.
//!
//! A line ends at a line break outside parentheses. Blank lines do not
//! become parts: their text, together with the line break that ended the
//! previous line, is carried into the `before` of the next part (or into
//! the text after the last part).

use sss_tokenizer::{LineIndex, Span, Token, TokenKind};
use tracing::trace;

use crate::decl::separator;
use crate::error::{ParseErrorKind, Spanned};

/// One non-blank line, with its indentation split off.
#[derive(Debug, Clone)]
pub(crate) struct Part<'src> {
    /// 1-based line of the first token.
    pub number: u32,
    /// Leading whitespace of the line.
    pub indent: &'src str,
    pub indent_span: Span,
    /// Line break(s) and blank lines between the previous part and this one.
    pub before: Span,
    /// Content tokens, without indentation and without the final line break.
    pub tokens: Vec<Token<'src>>,
    /// Has a `:` followed by whitespace or the end of the line, outside parentheses.
    pub colon: bool,
    /// Consists of a single comment.
    pub comment: bool,
    /// Starts with `@`.
    pub at_rule: bool,
    /// Last meaningful token is `,`.
    pub last_comma: bool,
}

impl<'src> Part<'src> {
    /// Width of the indentation, in characters.
    pub fn width(&self) -> usize {
        self.indent.chars().count()
    }

    /// The first content token.
    pub fn head(&self) -> Token<'src> {
        self.tokens[0]
    }

    /// A whitespace token covering `before` and the indentation, used to glue
    /// a continuation line onto the previous one.
    pub fn joint(&self, source: &'src str) -> Token<'src> {
        let span = Span::new(self.before.start, self.head().span.start);
        Token::new(TokenKind::Space, span, span.slice(source))
    }
}

/// All parts of a document plus the trailing text.
#[derive(Debug)]
pub(crate) struct Lines<'src> {
    pub parts: Vec<Part<'src>>,
    /// Text after the last part.
    pub after: Span,
}

/// Group `tokens` into parts.
pub(crate) fn split<'src>(
    source: &'src str,
    index: &LineIndex<'src>,
    tokens: Vec<Token<'src>>,
) -> Result<Lines<'src>, Spanned> {
    let end = source.len() as u32;

    let mut lines: Vec<Vec<Token<'src>>> = vec![Vec::new()];
    let mut open: Vec<Span> = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::Error => return Err(unclosed(token)),
            TokenKind::LParen => open.push(token.span),
            TokenKind::RParen => {
                open.pop();
            }
            _ => {}
        }
        let ends_line = token.kind == TokenKind::Newline && open.is_empty();
        if let Some(line) = lines.last_mut() {
            line.push(token);
        }
        if ends_line {
            lines.push(Vec::new());
        }
    }
    if let Some(span) = open.first() {
        return Err(Spanned::new(ParseErrorKind::UnclosedBracket, *span));
    }

    let mut parts = Vec::new();
    let mut pending = 0u32;
    for line in lines {
        let (indent_span, mut rest) = match line.first() {
            Some(first) if first.kind == TokenKind::Space => (first.span, line[1..].to_vec()),
            Some(first) => (Span::empty(first.span.start), line),
            None => (Span::empty(end), line),
        };
        if rest.iter().all(|t| t.kind == TokenKind::Newline) {
            continue;
        }

        let before = Span::new(pending, indent_span.start);
        pending = match rest.last() {
            Some(last) if last.kind == TokenKind::Newline => {
                let start = last.span.start;
                rest.pop();
                start
            }
            Some(last) => last.span.end,
            None => end,
        };

        let part = Part {
            number: index.start(rest[0].span).line,
            indent: indent_span.slice(source),
            indent_span,
            before,
            colon: separator(&rest).is_some(),
            comment: rest[0].kind.is_comment()
                && rest[1..].iter().all(|t| t.kind == TokenKind::Space),
            at_rule: rest[0].kind == TokenKind::AtWord,
            last_comma: ends_with_comma(&rest),
            tokens: rest,
        };
        trace!(
            "Part line {} indent {:?} colon={} comment={} at_rule={} last_comma={}",
            part.number,
            part.indent,
            part.colon,
            part.comment,
            part.at_rule,
            part.last_comma
        );
        parts.push(part);
    }

    Ok(Lines {
        parts,
        after: Span::new(pending, end),
    })
}

fn unclosed(token: Token<'_>) -> Spanned {
    let kind = if token.text.starts_with("/*") {
        ParseErrorKind::UnclosedComment
    } else {
        ParseErrorKind::UnclosedString
    };
    Spanned::new(kind, Span::new(token.span.start, token.span.start + 1))
}

fn ends_with_comma(tokens: &[Token<'_>]) -> bool {
    tokens
        .iter()
        .rev()
        .find(|t| !t.kind.is_trivia())
        .is_some_and(|t| t.kind == TokenKind::Comma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sss_tokenizer::tokenize;

    fn lines(source: &str) -> Lines<'_> {
        let index = LineIndex::new(source);
        split(source, &index, tokenize(source)).unwrap()
    }

    fn texts<'a>(part: &Part<'a>) -> Vec<&'a str> {
        part.tokens.iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_parts_and_before() {
        let source = "a\n\n  b: 1\n";
        let lines = lines(source);
        assert_eq!(lines.parts.len(), 2);

        let b = &lines.parts[1];
        assert_eq!(b.number, 3);
        assert_eq!(b.indent, "  ");
        assert_eq!(b.before.slice(source), "\n\n");
        assert!(b.colon);
        assert_eq!(texts(b), ["b", ":", " ", "1"]);
        assert_eq!(lines.after.slice(source), "\n");
    }

    #[test]
    fn test_blank_lines_go_to_after() {
        let source = "a\n \n";
        let lines = lines(source);
        assert_eq!(lines.parts.len(), 1);
        assert_eq!(lines.after.slice(source), "\n \n");
    }

    #[test]
    fn test_no_trailing_newline() {
        let source = "color: black";
        let lines = lines(source);
        assert_eq!(lines.after.slice(source), "");
    }

    #[test]
    fn test_parens_join_lines() {
        let source = "@media (a,\n  b)\n  c";
        let lines = lines(source);
        assert_eq!(lines.parts.len(), 2);
        assert_eq!(lines.parts[0].tokens.len(), 9);
        assert_eq!(lines.parts[1].number, 3);
    }

    #[test]
    fn test_flags() {
        let source = "a:hover\n// note\n@media\nh1,\nb: c";
        let lines = lines(source);
        let flags: Vec<_> = lines
            .parts
            .iter()
            .map(|p| (p.colon, p.comment, p.at_rule, p.last_comma))
            .collect();
        assert_eq!(
            flags,
            [
                (false, false, false, false),
                (false, true, false, false),
                (false, false, true, false),
                (false, false, false, true),
                (true, false, false, false),
            ]
        );
    }

    #[test]
    fn test_colon_at_end_of_line() {
        let source = "a :\n  b";
        let lines = lines(source);
        assert!(lines.parts[0].colon);
    }

    #[test]
    fn test_unclosed_bracket() {
        let source = "a\n  b: rgb(0,\n";
        let index = LineIndex::new(source);
        let err = split(source, &index, tokenize(source)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedBracket);
        assert_eq!(err.span.start, 10);
    }

    #[test]
    fn test_unclosed_string() {
        let source = "a: \"b";
        let index = LineIndex::new(source);
        let err = split(source, &index, tokenize(source)).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedString);
    }
}
