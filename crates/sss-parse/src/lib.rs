//! Parser for indentation-based style sheets.
//!
//! Nesting is expressed by leading indentation alone; braces and semicolons
//! are rejected. The resulting [`Root`] keeps every whitespace run in node
//! raws, so writing it back reproduces the input exactly.
//!
//! ```
//! use sss_parse::{ParseOptions, parse};
//!
//! let root = parse("a\n  color: black\n", &ParseOptions::default()).unwrap();
//! let rule = root.first().unwrap();
//! assert_eq!(root[rule].kind.as_rule().unwrap().selector, "a");
//! ```

pub use sss_tokenizer::{Position, Span};
pub use sss_tree::Root;

mod decl;
mod indent;
mod lines;
mod parser;

mod error;
pub use error::{DEFAULT_INPUT, ExpectedIndent, ParseError, ParseErrorKind};

mod options;
pub use options::ParseOptions;

/// Parse `source` into a tree.
///
/// Fails on the first error; there is no partial tree.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Root, ParseError> {
    parser::parse(source, options)
}
