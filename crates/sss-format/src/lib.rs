//! Output for indentation-based style sheet trees.
//!
//! [`stringify`] writes a tree back to its own syntax, reproducing parsed
//! input exactly and optionally recording a position map. [`to_css`]
//! compiles a tree to brace-delimited CSS.

mod css;
mod map;
mod options;
mod stringify;
mod writer;

pub use css::to_css;
pub use map::{Mapping, SourceMap};
pub use options::{MapOptions, StringifyOptions};
pub use stringify::{DEFAULT_INDENT, StringifyResult, stringify};
