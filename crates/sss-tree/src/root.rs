//! The root container and node arena.

use std::ops::{Index, IndexMut};

use crate::node::{Node, NodeId};
use crate::raws::{RootRaws, RootSource};

/// Error when attaching a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Declarations and comments cannot hold children.
    LeafParent {
        /// Kind of the would-be parent.
        kind: &'static str,
    },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::LeafParent { kind } => write!(f, "a {} cannot have children", kind),
        }
    }
}

impl std::error::Error for TreeError {}

/// A parsed style sheet.
///
/// Owns every node. Nodes are addressed by [`NodeId`]; a node's parent link
/// is a plain id and never keeps anything alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Root {
    nodes: Vec<Node>,
    children: Vec<NodeId>,
    pub raws: RootRaws,
    /// Source location (None if programmatically constructed).
    pub source: Option<RootSource>,
}

impl Root {
    /// An empty root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// First top-level node.
    pub fn first(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    /// Last top-level node.
    pub fn last(&self) -> Option<NodeId> {
        self.children.last().copied()
    }

    /// Whether the root has no top-level nodes.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes at any depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Children of `parent`, or top-level nodes for `None`.
    pub fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(id) => &self[id].children,
            None => &self.children,
        }
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].first()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self[id].last()
    }

    /// The containing node, `None` for top-level nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self[id].parent
    }

    /// Number of containers above `id`; top-level nodes are at depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }

    /// Attach `node` as the last child of `parent` (top level for `None`).
    pub fn append(&mut self, parent: Option<NodeId>, mut node: Node) -> Result<NodeId, TreeError> {
        if let Some(parent) = parent {
            let kind = &self[parent].kind;
            if !kind.is_container() {
                return Err(TreeError::LeafParent {
                    kind: kind.type_name(),
                });
            }
        }

        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);
        match parent {
            Some(parent) => self[parent].children.push(id),
            None => self.children.push(id),
        }
        Ok(id)
    }

    /// All nodes in document order (pre-order).
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            root: self,
            stack: self.children.iter().rev().copied().collect(),
        }
    }
}

impl Index<NodeId> for Root {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Root {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

/// Pre-order iterator over a [`Root`].
pub struct Walk<'a> {
    root: &'a Root,
    stack: Vec<NodeId>,
}

impl Iterator for Walk<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.root[id].children.iter().rev().copied());
        Some(id)
    }
}
