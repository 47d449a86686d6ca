//! Node slot of the graph store

use super::types::NodeIndex;
use serde::{Deserialize, Serialize};

/// A live node: its stable index and the caller's payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node<N> {
    /// Stable handle, unchanged by removals elsewhere in the graph
    pub index: NodeIndex,

    /// Caller-supplied data
    pub payload: N,
}

impl<N> Node<N> {
    pub fn new(index: NodeIndex, payload: N) -> Self {
        Node { index, payload }
    }

    pub fn into_payload(self) -> N {
        self.payload
    }
}
