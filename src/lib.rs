//! Trellis graph engine
//!
//! An in-memory graph library with stable node and edge handles, directed and
//! undirected variants, and a set of algorithms that run over any store
//! implementing [`GraphAccess`].
//!
//! # Architecture
//!
//! - `graph`: the tombstoned arena store (`GraphStore<N, E>`)
//! - `algo`: adapter over the `trellis-algorithms` crate (shortest paths,
//!   A*, Floyd–Warshall, dense matrices, traversals, isomorphism, layout)
//! - `generators`: lattice, classic and random graph constructors
//!
//! ## Example Usage
//!
//! ```rust
//! use trellis::algo::dijkstra_shortest_path_lengths;
//! use trellis::graph::{GraphError, GraphStore};
//!
//! let mut graph: GraphStore<&str, f64> = GraphStore::directed();
//!
//! let a = graph.add_node("A");
//! let b = graph.add_node("B");
//! let c = graph.add_node("C");
//! graph.add_edge(a, b, 7.0).unwrap();
//! graph.add_edge(b, c, 2.0).unwrap();
//! graph.add_edge(a, c, 14.0).unwrap();
//!
//! // Removing a node leaves every other handle valid
//! let d = graph.add_node("D");
//! graph.remove_node(d).unwrap();
//!
//! let lengths = dijkstra_shortest_path_lengths(&graph, a, |w: &f64| Ok::<f64, GraphError>(*w), None, false).unwrap();
//! assert_eq!(lengths[&c], 9.0);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod generators;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    Direction, Edge, EdgeIndex, GraphConfig, GraphError, GraphKind, GraphResult, GraphStatistics, GraphStore, Node,
    NodeIndex,
};

pub use trellis_algorithms::{AlgorithmError, AlgorithmResult, GraphAccess};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
