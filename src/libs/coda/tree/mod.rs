pub mod build;
pub mod path;
#[cfg(test)]
pub mod tests;

use super::error::CodaError;
use super::node::{Node, NodeId};
use std::fmt;

/// Search tree of candidate segmentations of one sequence.
///
/// Nodes live in an arena and refer to their children by index. Node 0 is
/// the root sentinel.
#[derive(Debug, Clone)]
pub struct SearchTree {
    /// Arena storage for all nodes
    pub(super) nodes: Vec<Node>,

    /// Number of intervals in the segmented sequence
    seq_len: usize,
}

impl SearchTree {
    /// Create a tree holding only the root
    pub fn new(seq_len: usize) -> Self {
        Self {
            nodes: vec![Node::new(0)],
            seq_len,
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn seq_len(&self) -> usize {
        self.seq_len
    }

    /// Get number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree is empty when nothing hangs below the root
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Store a detached node and return its ID. The node's own `id` is overwritten.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        node.id = id;
        node.parent = None;
        node.children.clear();
        self.nodes.push(node);
        id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Attach `child_id` below `parent_id`.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), CodaError> {
        if parent_id == child_id {
            return Err(CodaError::SelfReference(child_id));
        }
        if parent_id >= self.nodes.len() {
            return Err(CodaError::NodeNotFound(parent_id));
        }
        if child_id >= self.nodes.len() || child_id == self.root() {
            return Err(CodaError::NodeNotFound(child_id));
        }
        if let Some(parent) = self.nodes[child_id].parent {
            return Err(CodaError::AlreadyAttached {
                child: child_id,
                parent,
            });
        }

        self.nodes[child_id].parent = Some(parent_id);
        self.nodes[parent_id].children.push(child_id);

        Ok(())
    }

    /// Whether a noise segment already continues `id`
    pub fn has_noise_child(&self, id: NodeId) -> bool {
        self.nodes[id]
            .children
            .iter()
            .any(|&child| self.nodes[child].is_noise())
    }

    /// Node IDs in preorder (Root -> Children)
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            result.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                stack.push(child);
            }
        }

        result
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }
}

impl fmt::Display for SearchTree {
    /// Indented rendering, four spaces per level
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.preorder() {
            let indent = " ".repeat(4 * self.depth(id));
            writeln!(f, "{}{}", indent, self.nodes[id].label())?;
        }
        Ok(())
    }
}
