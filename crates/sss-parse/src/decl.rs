//! Splitting a declaration into property, separator and value.

use sss_tokenizer::{Token, TokenKind};

use crate::error::{ParseErrorKind, Spanned};

/// A declaration split at its colon.
#[derive(Debug)]
pub(crate) struct DeclHead<'src> {
    pub prop: String,
    /// Whitespace and comments around the colon, the colon itself, and the
    /// whitespace (line breaks included) before the first value token.
    pub between: String,
    pub value: Vec<Token<'src>>,
    pub colon: Token<'src>,
}

/// Index of the colon that separates property and value: outside
/// parentheses and followed by whitespace or nothing.
pub(crate) fn separator(tokens: &[Token<'_>]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Colon if depth == 0 => match tokens.get(i + 1) {
                None => return Some(i),
                Some(next) if next.kind.is_whitespace() => return Some(i),
                Some(_) => {}
            },
            _ => {}
        }
    }
    None
}

pub(crate) fn split<'src>(tokens: &[Token<'src>]) -> Result<DeclHead<'src>, Spanned> {
    let Some(at) = separator(tokens) else {
        return Err(Spanned::new(ParseErrorKind::UnnamedDecl, tokens[0].span));
    };

    let mut prop = String::new();
    let mut between = String::new();
    for token in &tokens[..at] {
        if token.kind.is_trivia() {
            between.push_str(token.text);
        } else if between.is_empty() {
            prop.push_str(token.text);
        } else {
            return Err(Spanned::new(ParseErrorKind::PropertySeparator, token.span));
        }
    }
    if prop.is_empty() {
        return Err(Spanned::new(ParseErrorKind::UnnamedDecl, tokens[0].span));
    }

    let colon = tokens[at];
    between.push_str(colon.text);
    let mut rest = &tokens[at + 1..];
    while let Some((first, tail)) = rest.split_first() {
        if !first.kind.is_whitespace() {
            break;
        }
        between.push_str(first.text);
        rest = tail;
    }

    Ok(DeclHead {
        prop,
        between,
        value: rest.to_vec(),
        colon,
    })
}
