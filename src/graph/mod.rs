//! Core graph store
//!
//! This module implements the stable-index graph model:
//! - Nodes and edges carrying arbitrary caller payloads
//! - Directed and undirected variants chosen at construction
//! - Parallel edges and self-loops
//! - Tombstoned arenas so removals never invalidate other handles

pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{Direction, EdgeIndex, GraphConfig, GraphKind, NodeIndex};
