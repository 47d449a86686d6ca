//! Shared utilities for graph algorithms
//!
//! Defines the stable handle types, the [`GraphAccess`] seam that graph stores
//! implement, and a read-only dense view of the topology for algorithm execution.

use crate::error::AlgorithmError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::fmt;

/// Stable handle of a node. Never reused after the node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        NodeIndex(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        NodeIndex(index)
    }
}

/// Stable handle of an edge. Never reused after the edge is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeIndex(pub usize);

impl EdgeIndex {
    pub fn new(index: usize) -> Self {
        EdgeIndex(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeIndex({})", self.0)
    }
}

impl From<usize> for EdgeIndex {
    fn from(index: usize) -> Self {
        EdgeIndex(index)
    }
}

/// Graph variant, fixed when the graph is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Directed => write!(f, "directed"),
            GraphKind::Undirected => write!(f, "undirected"),
        }
    }
}

/// Edge direction relative to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Borrowed view of a single edge
#[derive(Debug)]
pub struct EdgeRef<'a, E> {
    pub id: EdgeIndex,
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub weight: &'a E,
}

impl<'a, E> EdgeRef<'a, E> {
    /// The same edge seen from its other endpoint
    pub fn reversed(self) -> Self {
        EdgeRef {
            id: self.id,
            source: self.target,
            target: self.source,
            weight: self.weight,
        }
    }
}

impl<'a, E> Clone for EdgeRef<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for EdgeRef<'a, E> {}

/// Read access to a graph store.
///
/// For directed graphs `edges_directed(n, Outgoing)` yields edges whose source
/// is `n` and `Incoming` those whose target is `n`. For undirected graphs both
/// directions yield every incident edge, oriented so that `n` is the source
/// (`Outgoing`) or the target (`Incoming`); a self-loop is yielded once.
pub trait GraphAccess {
    type NodeWeight;
    type EdgeWeight;

    fn kind(&self) -> GraphKind;

    fn is_directed(&self) -> bool {
        self.kind() == GraphKind::Directed
    }

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Live node indices in ascending order
    fn node_indices(&self) -> Vec<NodeIndex>;

    fn contains_node(&self, node: NodeIndex) -> bool;

    fn node_weight(&self, node: NodeIndex) -> Option<&Self::NodeWeight>;

    fn edges_directed(
        &self,
        node: NodeIndex,
        direction: Direction,
    ) -> Vec<EdgeRef<'_, Self::EdgeWeight>>;

    /// Every live edge exactly once, in ascending edge index order
    fn edge_references(&self) -> Vec<EdgeRef<'_, Self::EdgeWeight>>;
}

/// Fail with `NodeNotFound` unless `node` is live in `graph`
pub fn ensure_node<G: GraphAccess>(graph: &G, node: NodeIndex) -> Result<(), AlgorithmError> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(AlgorithmError::NodeNotFound(node))
    }
}

/// Edges leaving `node` during a traversal, oriented so that `node` is the source.
///
/// With `as_undirected` a directed graph's incoming edges are followed backwards too.
pub fn edges_for_traversal<G: GraphAccess>(
    graph: &G,
    node: NodeIndex,
    as_undirected: bool,
) -> Vec<EdgeRef<'_, G::EdgeWeight>> {
    let mut edges = graph.edges_directed(node, Direction::Outgoing);
    if as_undirected && graph.is_directed() {
        edges.extend(
            graph
                .edges_directed(node, Direction::Incoming)
                .into_iter()
                .filter(|edge| edge.source != edge.target)
                .map(EdgeRef::reversed),
        );
    }
    edges
}

/// Distinct nodes reachable over one edge from `node`, in first-seen order
pub fn neighbors_for_traversal<G: GraphAccess>(
    graph: &G,
    node: NodeIndex,
    as_undirected: bool,
) -> Vec<NodeIndex> {
    let mut seen = HashSet::new();
    edges_for_traversal(graph, node, as_undirected)
        .into_iter()
        .map(|edge| edge.target)
        .filter(|target| seen.insert(*target))
        .collect()
}

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Dense indices `0..node_count` follow ascending `NodeIndex` order, so removed
/// slots never show up here.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeIndex
    pub index_to_node: Vec<NodeIndex>,
    /// Mapping from NodeIndex to dense index
    pub node_to_index: HashMap<NodeIndex, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices, one entry per edge
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Project a graph without weights.
    ///
    /// Undirected graphs (and directed ones with `as_undirected`) list every
    /// edge from both endpoints.
    pub fn from_graph<G: GraphAccess>(graph: &G, as_undirected: bool) -> Self {
        let no_weights: Option<fn(&G::EdgeWeight) -> Result<f64, Infallible>> = None;
        match Self::build(graph, as_undirected, no_weights) {
            Ok(view) => view,
            Err(never) => match never {},
        }
    }

    /// Project a graph, evaluating `weight_fn` once per adjacency entry
    pub fn from_graph_weighted<G, F, E>(
        graph: &G,
        as_undirected: bool,
        weight_fn: F,
    ) -> Result<Self, E>
    where
        G: GraphAccess,
        F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    {
        Self::build(graph, as_undirected, Some(weight_fn))
    }

    fn build<G, F, E>(graph: &G, as_undirected: bool, mut weight_fn: Option<F>) -> Result<Self, E>
    where
        G: GraphAccess,
        F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    {
        // 1. Build index mappings
        let index_to_node = graph.node_indices();
        let node_to_index: HashMap<NodeIndex, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &node)| (node, idx))
            .collect();
        let node_count = index_to_node.len();

        // 2. Build adjacency lists
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut weights: Option<Vec<Vec<f64>>> = weight_fn.as_ref().map(|_| vec![Vec::new(); node_count]);

        for (u_idx, &u) in index_to_node.iter().enumerate() {
            for edge in edges_for_traversal(graph, u, as_undirected) {
                if let Some(&v_idx) = node_to_index.get(&edge.target) {
                    outgoing[u_idx].push(v_idx);
                    incoming[v_idx].push(u_idx);

                    if let (Some(f), Some(w_rows)) = (weight_fn.as_mut(), weights.as_mut()) {
                        w_rows[u_idx].push(f(edge.weight)?);
                    }
                }
            }
        }

        // 3. Convert to CSR
        Ok(Self::from_adjacency_list(
            node_count,
            index_to_node,
            node_to_index,
            outgoing,
            incoming,
            weights,
        ))
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node, one entry per edge
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node, one entry per edge
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    pub fn index_of(&self, node: NodeIndex) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    /// Helper to create GraphView from adjacency lists
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeIndex>,
        node_to_index: HashMap<NodeIndex, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
        weights: Option<Vec<Vec<f64>>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        let mut flat_weights = if weights.is_some() { Some(Vec::new()) } else { None };

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());

            if let Some(ref mut w_flat) = flat_weights {
                if let Some(w_row) = weights.as_ref().map(|w| &w[i]) {
                    w_flat.extend(w_row.iter());
                }
            }
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
            weights: flat_weights,
        }
    }
}
