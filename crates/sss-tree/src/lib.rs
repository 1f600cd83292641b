//! Node tree for indentation-based style sheets.
//!
//! A [`Root`] owns every node in an arena. At-rules and rules hold children,
//! declarations and comments are leaves. Each node keeps the raw whitespace
//! it was parsed with so that the tree can be written back byte-for-byte.

mod node;
mod raws;
mod root;

pub use node::{AtRule, Comment, Declaration, Node, NodeId, NodeKind, Rule};
pub use raws::{
    AtRuleRaws, CommentRaws, DeclRaws, RawValue, RootRaws, RootSource, RuleRaws, Source,
};
pub use root::{Root, TreeError, Walk};
pub use sss_tokenizer::Position;

#[cfg(test)]
mod tests;
