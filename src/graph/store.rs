//! In-memory graph storage implementation
//!
//! Nodes and edges live in arenas of tombstoned slots: removing an element
//! empties its slot and the index is never handed out again, so every handle
//! captured before a removal keeps pointing at the same element.

use super::edge::Edge;
use super::node::Node;
use super::types::{Direction, EdgeIndex, GraphConfig, GraphKind, NodeIndex};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, trace};
use trellis_algorithms::{has_path, is_directed_acyclic_graph, AlgorithmError, EdgeRef, GraphAccess};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeIndex),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeIndex),

    #[error("No edge between {0} and {1}")]
    NoEdgeBetween(NodeIndex, NodeIndex),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeIndex),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeIndex),

    #[error("Adding this edge would create a cycle")]
    DagWouldCycle,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Callback failed: {0}")]
    CallbackFailure(String),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Slot usage of a graph store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub kind: GraphKind,
    pub node_count: usize,
    pub edge_count: usize,
    /// Node slots emptied by removals
    pub removed_nodes: usize,
    /// Edge slots emptied by removals
    pub removed_edges: usize,
    pub self_loops: usize,
}

/// In-memory graph storage
///
/// - nodes: NodeIndex -> Node (tombstoned arena)
/// - edges: EdgeIndex -> Edge (tombstoned arena)
/// - outgoing: NodeIndex -> Vec<EdgeIndex> (edges whose source is the node)
/// - incoming: NodeIndex -> Vec<EdgeIndex> (edges whose target is the node)
///
/// Adjacency lists stay in insertion order. Undirected graphs use the same
/// lists and read both of them for every query.
#[derive(Debug, Clone)]
pub struct GraphStore<N, E> {
    nodes: Vec<Option<Node<N>>>,
    edges: Vec<Option<Edge<E>>>,
    outgoing: Vec<Vec<EdgeIndex>>,
    incoming: Vec<Vec<EdgeIndex>>,
    config: GraphConfig,
    node_count: usize,
    edge_count: usize,
}

impl<N, E> GraphStore<N, E> {
    /// Create a new empty graph store
    pub fn new(config: GraphConfig) -> Self {
        GraphStore {
            nodes: Vec::new(),
            edges: Vec::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            config,
            node_count: 0,
            edge_count: 0,
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphConfig::directed())
    }

    pub fn undirected() -> Self {
        Self::new(GraphConfig::undirected())
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn kind(&self) -> GraphKind {
        self.config.kind
    }

    pub fn is_directed(&self) -> bool {
        self.config.kind == GraphKind::Directed
    }

    /// Toggle cycle rejection for later edge insertions.
    ///
    /// Enabling it on a directed graph that already has a cycle fails with
    /// `DagWouldCycle`. Undirected graphs accept the flag but never check it.
    pub fn set_check_cycle(&mut self, check_cycle: bool) -> GraphResult<()> {
        if check_cycle && !self.config.check_cycle && self.is_directed() && !is_directed_acyclic_graph(self) {
            return Err(GraphError::DagWouldCycle);
        }
        self.config.check_cycle = check_cycle;
        Ok(())
    }

    fn checks_cycles(&self) -> bool {
        self.config.check_cycle && self.is_directed()
    }

    /// Add a node and return its new, never reused index
    pub fn add_node(&mut self, payload: N) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        self.nodes.push(Some(Node::new(index, payload)));
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        self.node_count += 1;
        trace!("Added node {}", index);
        index
    }

    /// Add nodes in order, returning their indices
    pub fn add_nodes_from(&mut self, payloads: impl IntoIterator<Item = N>) -> Vec<NodeIndex> {
        payloads.into_iter().map(|payload| self.add_node(payload)).collect()
    }

    /// Create an edge between two nodes.
    ///
    /// Without multigraph support an existing edge between the pair has its
    /// payload replaced and keeps its index.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex, payload: E) -> GraphResult<EdgeIndex> {
        self.validate_endpoints(source, target)?;

        if !self.config.multigraph {
            if let Some(existing) = self.find_edge(source, target) {
                if let Some(Some(edge)) = self.edges.get_mut(existing.index()) {
                    edge.payload = payload;
                }
                trace!("Replaced payload of edge {}", existing);
                return Ok(existing);
            }
        }

        if self.checks_cycles() && (source == target || has_path(self, target, source, false)?) {
            debug!("Rejected edge {} -> {}: would create a cycle", source, target);
            return Err(GraphError::DagWouldCycle);
        }

        Ok(self.insert_edge(source, target, payload))
    }

    /// Create several edges, or none at all if any endpoint is missing or the
    /// batch would close a cycle in a cycle-checked graph
    pub fn add_edges_from(
        &mut self,
        edges: impl IntoIterator<Item = (NodeIndex, NodeIndex, E)>,
    ) -> GraphResult<Vec<EdgeIndex>> {
        let edges: Vec<(NodeIndex, NodeIndex, E)> = edges.into_iter().collect();
        for (source, target, _) in &edges {
            self.validate_endpoints(*source, *target)?;
        }

        if self.checks_cycles() {
            let pairs: Vec<(NodeIndex, NodeIndex)> = edges.iter().map(|(s, t, _)| (*s, *t)).collect();
            if self.has_cycle_with(&pairs) {
                return Err(GraphError::DagWouldCycle);
            }
        }

        let mut indices = Vec::with_capacity(edges.len());
        for (source, target, payload) in edges {
            let existing = if self.config.multigraph { None } else { self.find_edge(source, target) };
            let index = match existing {
                Some(index) => {
                    if let Some(Some(edge)) = self.edges.get_mut(index.index()) {
                        edge.payload = payload;
                    }
                    index
                }
                None => self.insert_edge(source, target, payload),
            };
            indices.push(index);
        }
        Ok(indices)
    }

    /// Add a node and an edge from `parent` to it
    pub fn add_child(&mut self, parent: NodeIndex, node_payload: N, edge_payload: E) -> GraphResult<NodeIndex> {
        if !self.has_node(parent) {
            return Err(GraphError::NodeNotFound(parent));
        }
        let child = self.add_node(node_payload);
        self.insert_edge(parent, child, edge_payload);
        Ok(child)
    }

    /// Add a node and an edge from it to `child`
    pub fn add_parent(&mut self, child: NodeIndex, node_payload: N, edge_payload: E) -> GraphResult<NodeIndex> {
        if !self.has_node(child) {
            return Err(GraphError::NodeNotFound(child));
        }
        let parent = self.add_node(node_payload);
        self.insert_edge(parent, child, edge_payload);
        Ok(parent)
    }

    fn validate_endpoints(&self, source: NodeIndex, target: NodeIndex) -> GraphResult<()> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }
        Ok(())
    }

    /// Endpoints must already be validated
    fn insert_edge(&mut self, source: NodeIndex, target: NodeIndex, payload: E) -> EdgeIndex {
        let index = EdgeIndex::new(self.edges.len());
        self.edges.push(Some(Edge::new(index, source, target, payload)));
        self.outgoing[source.index()].push(index);
        self.incoming[target.index()].push(index);
        self.edge_count += 1;
        trace!("Added edge {}: {} -> {}", index, source, target);
        index
    }

    fn has_cycle_with(&self, extra: &[(NodeIndex, NodeIndex)]) -> bool {
        let mut in_degree: HashMap<NodeIndex, usize> = self.node_indices().into_iter().map(|n| (n, 0)).collect();
        let mut adjacency: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        for (source, target) in self.edges().map(Edge::endpoints).chain(extra.iter().copied()) {
            adjacency.entry(source).or_default().push(target);
            *in_degree.entry(target).or_insert(0) += 1;
        }

        let mut ready: Vec<NodeIndex> = in_degree.iter().filter(|(_, &d)| d == 0).map(|(&n, _)| n).collect();
        let mut visited = 0;
        while let Some(node) = ready.pop() {
            visited += 1;
            for next in adjacency.get(&node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(*next);
                    }
                }
            }
        }
        visited != in_degree.len()
    }

    /// Delete a node and all its connected edges, returning its payload
    pub fn remove_node(&mut self, index: NodeIndex) -> GraphResult<N> {
        let node = self
            .nodes
            .get_mut(index.index())
            .and_then(Option::take)
            .ok_or(GraphError::NodeNotFound(index))?;
        self.node_count -= 1;

        let outgoing_edges = std::mem::take(&mut self.outgoing[index.index()]);
        let incoming_edges = std::mem::take(&mut self.incoming[index.index()]);
        let mut removed = 0;
        for edge in outgoing_edges.iter().chain(incoming_edges.iter()) {
            if self.remove_edge(*edge).is_ok() {
                removed += 1;
            }
        }

        debug!("Removed node {} and {} incident edges", index, removed);
        Ok(node.into_payload())
    }

    /// Delete an edge, returning its payload
    pub fn remove_edge(&mut self, index: EdgeIndex) -> GraphResult<E> {
        let edge = self
            .edges
            .get_mut(index.index())
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(index))?;
        self.edge_count -= 1;

        if let Some(adj) = self.outgoing.get_mut(edge.source.index()) {
            adj.retain(|&e| e != index);
        }
        if let Some(adj) = self.incoming.get_mut(edge.target.index()) {
            adj.retain(|&e| e != index);
        }

        trace!("Removed edge {}", index);
        Ok(edge.payload)
    }

    /// Delete the first edge found between two nodes
    pub fn remove_edge_between(&mut self, a: NodeIndex, b: NodeIndex) -> GraphResult<E> {
        let edge = self.find_edge(a, b).ok_or(GraphError::NoEdgeBetween(a, b))?;
        self.remove_edge(edge)
    }

    pub fn has_node(&self, index: NodeIndex) -> bool {
        matches!(self.nodes.get(index.index()), Some(Some(_)))
    }

    pub fn contains_edge(&self, index: EdgeIndex) -> bool {
        matches!(self.edges.get(index.index()), Some(Some(_)))
    }

    pub fn get_node(&self, index: NodeIndex) -> Option<&Node<N>> {
        self.nodes.get(index.index()).and_then(Option::as_ref)
    }

    pub fn get_edge(&self, index: EdgeIndex) -> Option<&Edge<E>> {
        self.edges.get(index.index()).and_then(Option::as_ref)
    }

    pub fn node_payload(&self, index: NodeIndex) -> GraphResult<&N> {
        self.get_node(index)
            .map(|node| &node.payload)
            .ok_or(GraphError::NodeNotFound(index))
    }

    pub fn node_payload_mut(&mut self, index: NodeIndex) -> GraphResult<&mut N> {
        self.nodes
            .get_mut(index.index())
            .and_then(Option::as_mut)
            .map(|node| &mut node.payload)
            .ok_or(GraphError::NodeNotFound(index))
    }

    pub fn edge_payload(&self, index: EdgeIndex) -> GraphResult<&E> {
        self.get_edge(index)
            .map(|edge| &edge.payload)
            .ok_or(GraphError::EdgeNotFound(index))
    }

    pub fn edge_payload_mut(&mut self, index: EdgeIndex) -> GraphResult<&mut E> {
        self.edges
            .get_mut(index.index())
            .and_then(Option::as_mut)
            .map(|edge| &mut edge.payload)
            .ok_or(GraphError::EdgeNotFound(index))
    }

    pub fn edge_endpoints(&self, index: EdgeIndex) -> GraphResult<(NodeIndex, NodeIndex)> {
        self.get_edge(index)
            .map(Edge::endpoints)
            .ok_or(GraphError::EdgeNotFound(index))
    }

    /// Every edge between `a` and `b`, ascending. Undirected graphs match
    /// both orientations.
    pub fn edges_between(&self, a: NodeIndex, b: NodeIndex) -> Vec<EdgeIndex> {
        if self.is_directed() {
            return self
                .out_edge_list(a)
                .iter()
                .filter_map(|&e| self.get_edge(e))
                .filter(|edge| edge.target == b)
                .map(|edge| edge.index)
                .collect();
        }

        // A self-loop sits in both lists of its node
        let mut found: Vec<EdgeIndex> = self
            .out_edge_list(a)
            .iter()
            .chain(self.in_edge_list(a))
            .filter_map(|&e| self.get_edge(e))
            .filter(|edge| edge.connects(a, b))
            .map(|edge| edge.index)
            .collect();
        found.sort();
        found.dedup();
        found
    }

    pub fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        self.edges_between(a, b).first().copied()
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.find_edge(a, b).is_some()
    }

    fn out_edge_list(&self, node: NodeIndex) -> &[EdgeIndex] {
        self.outgoing.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    fn in_edge_list(&self, node: NodeIndex) -> &[EdgeIndex] {
        self.incoming.get(node.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    fn ensure_node(&self, index: NodeIndex) -> GraphResult<()> {
        if self.has_node(index) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(index))
        }
    }

    /// Distinct nodes reachable over one edge, in first-seen order
    pub fn successors(&self, node: NodeIndex) -> GraphResult<Vec<NodeIndex>> {
        self.ensure_node(node)?;
        Ok(dedup(self.edges_directed(node, Direction::Outgoing).into_iter().map(|e| e.target)))
    }

    /// Distinct nodes with an edge into `node`, in first-seen order
    pub fn predecessors(&self, node: NodeIndex) -> GraphResult<Vec<NodeIndex>> {
        self.ensure_node(node)?;
        Ok(dedup(self.edges_directed(node, Direction::Incoming).into_iter().map(|e| e.source)))
    }

    /// Adjacent nodes: successors on a directed graph, every adjacent node on
    /// an undirected one. A self-loop lists the node once.
    pub fn neighbors(&self, node: NodeIndex) -> GraphResult<Vec<NodeIndex>> {
        self.successors(node)
    }

    pub fn out_degree(&self, node: NodeIndex) -> GraphResult<usize> {
        self.ensure_node(node)?;
        if self.is_directed() {
            Ok(self.out_edge_list(node).len())
        } else {
            self.degree(node)
        }
    }

    pub fn in_degree(&self, node: NodeIndex) -> GraphResult<usize> {
        self.ensure_node(node)?;
        if self.is_directed() {
            Ok(self.in_edge_list(node).len())
        } else {
            self.degree(node)
        }
    }

    /// Incident edge ends. A self-loop counts twice.
    pub fn degree(&self, node: NodeIndex) -> GraphResult<usize> {
        self.ensure_node(node)?;
        Ok(self.out_edge_list(node).len() + self.in_edge_list(node).len())
    }

    /// Live node indices, ascending
    pub fn node_indices(&self) -> Vec<NodeIndex> {
        self.nodes().map(|node| node.index).collect()
    }

    /// Live edge indices, ascending
    pub fn edge_indices(&self) -> Vec<EdgeIndex> {
        self.edges().map(|edge| edge.index).collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.nodes.iter().flatten()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<E>> {
        self.edges.iter().flatten()
    }

    pub fn edge_list(&self) -> Vec<(NodeIndex, NodeIndex)> {
        self.edges().map(Edge::endpoints).collect()
    }

    pub fn weighted_edge_list(&self) -> Vec<(NodeIndex, NodeIndex, &E)> {
        self.edges()
            .map(|edge| (edge.source, edge.target, &edge.payload))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            kind: self.kind(),
            node_count: self.node_count,
            edge_count: self.edge_count,
            removed_nodes: self.nodes.len() - self.node_count,
            removed_edges: self.edges.len() - self.edge_count,
            self_loops: self.edges().filter(|edge| edge.is_self_loop()).count(),
        }
    }

    fn edge_ref(&self, index: EdgeIndex) -> Option<EdgeRef<'_, E>> {
        self.get_edge(index).map(|edge| EdgeRef {
            id: edge.index,
            source: edge.source,
            target: edge.target,
            weight: &edge.payload,
        })
    }
}

fn dedup(nodes: impl Iterator<Item = NodeIndex>) -> Vec<NodeIndex> {
    let mut seen = HashSet::new();
    nodes.filter(|node| seen.insert(*node)).collect()
}

impl<N, E> Default for GraphStore<N, E> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl<N, E> GraphAccess for GraphStore<N, E> {
    type NodeWeight = N;
    type EdgeWeight = E;

    fn kind(&self) -> GraphKind {
        self.config.kind
    }

    fn node_count(&self) -> usize {
        self.node_count
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn node_indices(&self) -> Vec<NodeIndex> {
        GraphStore::node_indices(self)
    }

    fn contains_node(&self, node: NodeIndex) -> bool {
        self.has_node(node)
    }

    fn node_weight(&self, node: NodeIndex) -> Option<&N> {
        self.get_node(node).map(|n| &n.payload)
    }

    fn edges_directed(&self, node: NodeIndex, direction: Direction) -> Vec<EdgeRef<'_, E>> {
        if self.is_directed() {
            let list = match direction {
                Direction::Outgoing => self.out_edge_list(node),
                Direction::Incoming => self.in_edge_list(node),
            };
            return list.iter().filter_map(|&e| self.edge_ref(e)).collect();
        }

        // Both lists, self-loops once, in edge index order
        let mut incident: Vec<EdgeIndex> = self.out_edge_list(node).to_vec();
        incident.extend(
            self.in_edge_list(node)
                .iter()
                .copied()
                .filter(|&e| self.get_edge(e).map_or(false, |edge| !edge.is_self_loop())),
        );
        incident.sort();

        incident
            .into_iter()
            .filter_map(|e| self.edge_ref(e))
            .map(|edge| {
                let near = match direction {
                    Direction::Outgoing => edge.source,
                    Direction::Incoming => edge.target,
                };
                if near == node {
                    edge
                } else {
                    edge.reversed()
                }
            })
            .collect()
    }

    fn edge_references(&self) -> Vec<EdgeRef<'_, E>> {
        self.edges()
            .map(|edge| EdgeRef {
                id: edge.index,
                source: edge.source,
                target: edge.target,
                weight: &edge.payload,
            })
            .collect()
    }
}
