//! Raw text fragments kept alongside semantic node content.
//!
//! Every field is optional: `None` means "not captured", and the stringifier
//! substitutes a computed default. Parsed trees fill in everything needed to
//! reproduce the input exactly.

use sss_tokenizer::Position;

/// A semantic value together with the literal text it was cleaned from.
///
/// Only present when the two differ (trailing whitespace or comments were
/// stripped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawValue {
    /// The cleaned value, as stored on the node when parsed.
    pub value: String,
    /// The literal source text.
    pub raw: String,
}

impl RawValue {
    pub fn new(value: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            raw: raw.into(),
        }
    }

    /// The raw text if `current` still equals the parsed value, else `current`.
    ///
    /// A node whose value was changed after parsing no longer uses its raw.
    pub fn resolve<'a>(this: Option<&'a RawValue>, current: &'a str) -> &'a str {
        match this {
            Some(raw) if raw.value == current => &raw.raw,
            _ => current,
        }
    }
}

/// Raws of an at-rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtRuleRaws {
    /// Whitespace between the name and the params.
    pub after_name: Option<String>,
    /// Params before cleaning.
    pub params: Option<RawValue>,
    /// Trailing whitespace of the header line.
    pub sss_between: Option<String>,
}

/// Raws of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRaws {
    /// Selector before cleaning.
    pub selector: Option<RawValue>,
    /// Trailing whitespace of the selector's last line.
    pub sss_between: Option<String>,
}

/// Raws of a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclRaws {
    /// Everything between the property and the first value character,
    /// colon included.
    pub between: Option<String>,
    /// Value before cleaning.
    pub value: Option<RawValue>,
}

/// Raws of a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRaws {
    /// `//` comment rather than `/* */`.
    pub inline: bool,
    /// Whitespace between the opening marker and the text.
    pub left: Option<String>,
    /// Whitespace after the text: up to the end of line for `//`, up to `*/` otherwise.
    pub right: Option<String>,
    /// Whitespace after `*/` on the same line.
    pub sss_between: Option<String>,
}

/// Raws of the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootRaws {
    /// Text after the last node: line breaks and blank lines.
    pub after: String,
    /// The indentation unit, fixed by the first indented line.
    pub indent: Option<String>,
}

/// Where a node came from in the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Source {
    /// First character of the node.
    pub start: Position,
    /// Last character of the node content.
    pub end: Position,
}

/// Where the root came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSource {
    /// The input identifier used in messages and maps.
    pub input: String,
    pub start: Position,
    /// Last non-whitespace character of the input, `None` for blank input.
    pub end: Option<Position>,
}
