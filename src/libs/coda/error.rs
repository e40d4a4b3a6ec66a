use super::node::NodeId;
use thiserror::Error;

/// Broken invariants of the segmentation engine.
///
/// Empty results (no candidate, no complete path) are not errors; they are
/// reported as empty collections or `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodaError {
    #[error("node {0} cannot be a child of itself")]
    SelfReference(NodeId),

    #[error("node {child} already has parent {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("segment ends at {end}, beyond the sequence length {len}")]
    Overrun { end: usize, len: usize },

    #[error("segment starts at {start}, but the previous one ends at {expected}")]
    Discontiguous { start: usize, expected: usize },

    #[error("path ends at {end}, but the sequence has {len} intervals")]
    Incomplete { end: usize, len: usize },

    #[error("search tree exceeds {0} nodes")]
    NodeBudget(usize),
}
