//! Node types.

use std::fmt;

use crate::raws::{AtRuleRaws, CommentRaws, DeclRaws, RuleRaws, Source};

/// Handle of a node inside its [`Root`](crate::Root).
///
/// Only meaningful for the root that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// `@name params`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// Name without the `@`.
    pub name: String,
    pub params: String,
    pub raws: AtRuleRaws,
}

/// A selector line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub raws: RuleRaws,
}

/// `prop: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub raws: DeclRaws,
}

/// `// text` or `/* text */`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub raws: CommentRaws,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    AtRule(AtRule),
    Rule(Rule),
    Decl(Declaration),
    Comment(Comment),
}

impl NodeKind {
    /// At-rules and rules hold children; declarations and comments are leaves.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::AtRule(_) | NodeKind::Rule(_))
    }

    /// Short lowercase name of the kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::AtRule(_) => "atrule",
            NodeKind::Rule(_) => "rule",
            NodeKind::Decl(_) => "decl",
            NodeKind::Comment(_) => "comment",
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            NodeKind::AtRule(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            NodeKind::Rule(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_decl(&self) -> Option<&Declaration> {
        match self {
            NodeKind::Decl(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            NodeKind::Comment(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_at_rule_mut(&mut self) -> Option<&mut AtRule> {
        match self {
            NodeKind::AtRule(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_rule_mut(&mut self) -> Option<&mut Rule> {
        match self {
            NodeKind::Rule(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_decl_mut(&mut self) -> Option<&mut Declaration> {
        match self {
            NodeKind::Decl(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_comment_mut(&mut self) -> Option<&mut Comment> {
        match self {
            NodeKind::Comment(node) => Some(node),
            _ => None,
        }
    }
}

/// A node in the tree: its kind plus the data every kind shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Text between the previous node's content and this node: the line
    /// break, any blank lines, and the indentation.
    pub before: Option<String>,
    /// Source location (None if programmatically constructed).
    pub source: Option<Source>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// A detached node with no raws and no source.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            before: None,
            source: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// `@name params`.
    pub fn at_rule(name: impl Into<String>, params: impl Into<String>) -> Self {
        Self::new(NodeKind::AtRule(AtRule {
            name: name.into(),
            params: params.into(),
            raws: AtRuleRaws::default(),
        }))
    }

    /// A rule with the given selector.
    pub fn rule(selector: impl Into<String>) -> Self {
        Self::new(NodeKind::Rule(Rule {
            selector: selector.into(),
            raws: RuleRaws::default(),
        }))
    }

    /// `prop: value`.
    pub fn decl(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(NodeKind::Decl(Declaration {
            prop: prop.into(),
            value: value.into(),
            raws: DeclRaws::default(),
        }))
    }

    /// An inline `//` comment.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Comment(Comment {
            text: text.into(),
            raws: CommentRaws {
                inline: true,
                ..CommentRaws::default()
            },
        }))
    }

    /// Set the `before` raw.
    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    /// Set the source location.
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// The containing node, `None` for top-level nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn first(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.children.last().copied()
    }
}
