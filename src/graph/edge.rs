//! Edge slot of the graph store
//!
//! Edges always record the endpoints in the order they were given. For
//! undirected graphs that order carries no meaning beyond reporting.

use super::types::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

/// A live edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<E> {
    /// Stable handle
    pub index: EdgeIndex,

    /// Source node (edge goes FROM this node)
    pub source: NodeIndex,

    /// Target node (edge goes TO this node)
    pub target: NodeIndex,

    /// Caller-supplied data
    pub payload: E,
}

impl<E> Edge<E> {
    pub fn new(index: EdgeIndex, source: NodeIndex, target: NodeIndex, payload: E) -> Self {
        Edge {
            index,
            source,
            target,
            payload,
        }
    }

    pub fn endpoints(&self) -> (NodeIndex, NodeIndex) {
        (self.source, self.target)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Check if this edge connects two nodes, in either orientation
    pub fn connects(&self, node1: NodeIndex, node2: NodeIndex) -> bool {
        (self.source == node1 && self.target == node2) || (self.source == node2 && self.target == node1)
    }
}
