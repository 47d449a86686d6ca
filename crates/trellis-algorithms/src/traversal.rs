//! Traversals and reachability
//!
//! Depth-first edge iteration, breadth-first successor listing, simple path
//! enumeration and topological ordering. Neighbors are visited in edge
//! insertion order, each distinct neighbor once.

use crate::common::{ensure_node, neighbors_for_traversal, Direction, GraphAccess, GraphKind, NodeIndex};
use crate::error::{AlgorithmError, AlgorithmResult};
use indexmap::IndexSet;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::vec::IntoIter;
use tracing::trace;

/// Lazy iterator over depth-first tree edges.
///
/// Created by [`dfs_edges`]. Each call to `dfs_edges` starts a fresh
/// traversal; the graph cannot change while the iterator borrows it.
pub struct DfsEdges<'a, G> {
    graph: &'a G,
    roots: IntoIter<NodeIndex>,
    visited: HashSet<NodeIndex>,
    stack: Vec<(NodeIndex, IntoIter<NodeIndex>)>,
}

impl<'a, G: GraphAccess> DfsEdges<'a, G> {
    fn push(&mut self, node: NodeIndex) {
        self.visited.insert(node);
        let children = neighbors_for_traversal(self.graph, node, false);
        self.stack.push((node, children.into_iter()));
    }
}

impl<'a, G: GraphAccess> Iterator for DfsEdges<'a, G> {
    type Item = (NodeIndex, NodeIndex);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.stack.is_empty() {
                let root = self.roots.find(|node| !self.visited.contains(node))?;
                self.push(root);
            }
            let (parent, children) = self.stack.last_mut()?;
            let parent = *parent;

            match children.find(|child| !self.visited.contains(child)) {
                Some(child) => {
                    self.push(child);
                    return Some((parent, child));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Depth-first tree edges from `source`, or covering every node when `source`
/// is `None` (unvisited roots taken in ascending index order).
///
/// Follows edge direction on directed graphs.
pub fn dfs_edges<G: GraphAccess>(graph: &G, source: Option<NodeIndex>) -> AlgorithmResult<DfsEdges<'_, G>> {
    let roots = match source {
        Some(node) => {
            ensure_node(graph, node)?;
            vec![node]
        }
        None => graph.node_indices(),
    };

    Ok(DfsEdges {
        graph,
        roots: roots.into_iter(),
        visited: HashSet::new(),
        stack: Vec::new(),
    })
}

/// Breadth-first successors of every node reached from `source`.
///
/// Each entry pairs a node with the children it discovered, in visiting
/// order. Nodes that discovered nothing are left out.
pub fn bfs_successors<G: GraphAccess>(
    graph: &G,
    source: NodeIndex,
) -> AlgorithmResult<Vec<(NodeIndex, Vec<NodeIndex>)>> {
    ensure_node(graph, source)?;

    let mut visited = HashSet::from([source]);
    let mut queue = VecDeque::from([source]);
    let mut result = Vec::new();

    while let Some(node) = queue.pop_front() {
        let children: Vec<NodeIndex> = neighbors_for_traversal(graph, node, false)
            .into_iter()
            .filter(|child| visited.insert(*child))
            .collect();
        if !children.is_empty() {
            queue.extend(children.iter().copied());
            result.push((node, children));
        }
    }

    Ok(result)
}

/// Every simple path from `from` to `to`, both included.
///
/// `min_depth` and `cutoff` bound the number of nodes in a returned path.
/// A path from a node to itself is never simple, so `from == to` yields
/// nothing.
pub fn all_simple_paths<G: GraphAccess>(
    graph: &G,
    from: NodeIndex,
    to: NodeIndex,
    min_depth: Option<usize>,
    cutoff: Option<usize>,
) -> AlgorithmResult<Vec<Vec<NodeIndex>>> {
    ensure_node(graph, from)?;
    ensure_node(graph, to)?;

    let min_nodes = min_depth.unwrap_or(0);
    let max_nodes = cutoff.unwrap_or(usize::MAX);
    let mut paths = Vec::new();
    if from == to || max_nodes < 2 {
        return Ok(paths);
    }

    let mut path: IndexSet<NodeIndex> = IndexSet::from([from]);
    let mut stack = vec![neighbors_for_traversal(graph, from, false).into_iter()];

    while let Some(children) = stack.last_mut() {
        let Some(child) = children.next() else {
            stack.pop();
            path.pop();
            continue;
        };
        if path.contains(&child) {
            continue;
        }

        if child == to {
            if path.len() + 1 >= min_nodes {
                let mut found: Vec<NodeIndex> = path.iter().copied().collect();
                found.push(to);
                paths.push(found);
            }
        } else if path.len() + 1 < max_nodes {
            path.insert(child);
            stack.push(neighbors_for_traversal(graph, child, false).into_iter());
        }
    }

    trace!("Found {} simple paths from {} to {}", paths.len(), from, to);
    Ok(paths)
}

/// Whether `to` can be reached from `from`
pub fn has_path<G: GraphAccess>(
    graph: &G,
    from: NodeIndex,
    to: NodeIndex,
    as_undirected: bool,
) -> AlgorithmResult<bool> {
    ensure_node(graph, from)?;
    ensure_node(graph, to)?;

    let mut visited = HashSet::from([from]);
    let mut stack = vec![from];
    while let Some(node) = stack.pop() {
        if node == to {
            return Ok(true);
        }
        for next in neighbors_for_traversal(graph, node, as_undirected) {
            if visited.insert(next) {
                stack.push(next);
            }
        }
    }
    Ok(false)
}

/// Topological order of a directed graph.
///
/// Among nodes that are ready at the same time the lowest index comes first,
/// so the order is deterministic. Fails with `InvalidArgument` if the graph
/// has a cycle.
pub fn topological_sort<G: GraphAccess>(graph: &G) -> AlgorithmResult<Vec<NodeIndex>> {
    if !graph.is_directed() {
        return Err(AlgorithmError::VariantMismatch {
            expected: GraphKind::Directed,
            found: graph.kind(),
        });
    }

    let nodes = graph.node_indices();
    let mut in_degree: HashMap<NodeIndex, usize> = nodes
        .iter()
        .map(|&node| (node, graph.edges_directed(node, Direction::Incoming).len()))
        .collect();

    let mut ready: BinaryHeap<Reverse<NodeIndex>> = nodes
        .iter()
        .filter(|node| in_degree[node] == 0)
        .map(|&node| Reverse(node))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(Reverse(node)) = ready.pop() {
        order.push(node);
        for edge in graph.edges_directed(node, Direction::Outgoing) {
            if let Some(degree) = in_degree.get_mut(&edge.target) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(edge.target));
                }
            }
        }
    }

    if order.len() != nodes.len() {
        return Err(AlgorithmError::InvalidArgument("graph contains a cycle".to_string()));
    }
    Ok(order)
}

/// True for directed graphs without cycles. Undirected graphs are never DAGs.
pub fn is_directed_acyclic_graph<G: GraphAccess>(graph: &G) -> bool {
    graph.is_directed() && topological_sort(graph).is_ok()
}
