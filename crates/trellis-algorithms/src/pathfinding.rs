//! Pathfinding algorithms
//!
//! Breadth-first search and Dijkstra's algorithm over any [`GraphAccess`] store.
//! Equal-cost candidates leave the queue in ascending `NodeIndex` order and a
//! node's predecessor only changes on a strict improvement, so results are
//! deterministic.

use crate::common::{edges_for_traversal, ensure_node, neighbors_for_traversal, GraphAccess, NodeIndex};
use crate::error::{checked_weight, AlgorithmError, AlgorithmResult};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use tracing::debug;

/// Result of a single-pair pathfinding algorithm
#[derive(Debug, Clone)]
pub struct PathResult {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub path: Vec<NodeIndex>,
    pub cost: f64,
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Follows edge direction on directed graphs. Returns `None` when either node
/// is absent or `target` is unreachable.
pub fn bfs<G: GraphAccess>(graph: &G, source: NodeIndex, target: NodeIndex) -> Option<PathResult> {
    if !graph.contains_node(source) || !graph.contains_node(target) {
        return None;
    }

    let mut queue = VecDeque::new();
    let mut visited = HashMap::new(); // node -> parent

    queue.push_back(source);
    visited.insert(source, None);

    while let Some(current) = queue.pop_front() {
        if current == target {
            let path = reconstruct_path(&visited, target);
            return Some(PathResult {
                source,
                target,
                cost: (path.len() - 1) as f64,
                path,
            });
        }

        for next in neighbors_for_traversal(graph, current, false) {
            if !visited.contains_key(&next) {
                visited.insert(next, Some(current));
                queue.push_back(next);
            }
        }
    }

    None
}

fn reconstruct_path(parents: &HashMap<NodeIndex, Option<NodeIndex>>, target: NodeIndex) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut curr = Some(target);
    while let Some(node) = curr {
        path.push(node);
        curr = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

/// State for the min-priority queues used by Dijkstra and A*
#[derive(Copy, Clone, PartialEq)]
pub(crate) struct State {
    pub(crate) cost: f64,
    pub(crate) node: NodeIndex,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap, lowest index first on ties
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Settled distances and the shortest-path tree of one Dijkstra run
struct DijkstraSearch {
    distances: HashMap<NodeIndex, f64>,
    parents: HashMap<NodeIndex, Option<NodeIndex>>,
    settled: HashSet<NodeIndex>,
}

impl DijkstraSearch {
    /// Nodes to report: every settled node except the source, or just the target
    fn reported_nodes(&self, source: NodeIndex, target: Option<NodeIndex>) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = match target {
            Some(t) if self.settled.contains(&t) => vec![t],
            Some(_) => Vec::new(),
            None => self.settled.iter().copied().filter(|&n| n != source).collect(),
        };
        nodes.sort();
        nodes
    }
}

fn run_dijkstra<G, F, E>(
    graph: &G,
    source: NodeIndex,
    target: Option<NodeIndex>,
    as_undirected: bool,
    weight_fn: &mut F,
) -> Result<DijkstraSearch, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    ensure_node(graph, source)?;
    if let Some(t) = target {
        ensure_node(graph, t)?;
    }

    let mut distances = HashMap::new();
    let mut parents = HashMap::new();
    let mut settled = HashSet::new();
    let mut heap = BinaryHeap::new();

    distances.insert(source, 0.0);
    parents.insert(source, None);
    heap.push(State { cost: 0.0, node: source });

    while let Some(State { cost, node }) = heap.pop() {
        if !settled.insert(node) {
            continue;
        }
        if target == Some(node) {
            break;
        }

        for edge in edges_for_traversal(graph, node, as_undirected) {
            let next = edge.target;
            if settled.contains(&next) {
                continue;
            }

            let weight = checked_weight(weight_fn(edge.weight)?)?;
            let next_cost = cost + weight;

            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(node));
                heap.push(State { cost: next_cost, node: next });
            }
        }
    }

    debug!("Dijkstra from {} settled {} nodes", source, settled.len());

    Ok(DijkstraSearch {
        distances,
        parents,
        settled,
    })
}

/// Dijkstra shortest path lengths from `source`.
///
/// Unreachable nodes are absent. The source itself is only reported when it is
/// the `target`. With `target`, the search stops as soon as it is settled.
/// `as_undirected` lets a directed graph be traversed against edge direction.
pub fn dijkstra_shortest_path_lengths<G, F, E>(
    graph: &G,
    source: NodeIndex,
    mut weight_fn: F,
    target: Option<NodeIndex>,
    as_undirected: bool,
) -> Result<IndexMap<NodeIndex, f64>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let search = run_dijkstra(graph, source, target, as_undirected, &mut weight_fn)?;
    Ok(search
        .reported_nodes(source, target)
        .into_iter()
        .map(|node| (node, search.distances[&node]))
        .collect())
}

/// Dijkstra shortest paths from `source`, each listed from `source` to the node inclusive
pub fn dijkstra_shortest_paths_with<G, F, E>(
    graph: &G,
    source: NodeIndex,
    mut weight_fn: F,
    target: Option<NodeIndex>,
    as_undirected: bool,
) -> Result<IndexMap<NodeIndex, Vec<NodeIndex>>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let search = run_dijkstra(graph, source, target, as_undirected, &mut weight_fn)?;
    Ok(search
        .reported_nodes(source, target)
        .into_iter()
        .map(|node| (node, reconstruct_path(&search.parents, node)))
        .collect())
}

/// Dijkstra shortest paths with every edge weighing 1.0
pub fn dijkstra_shortest_paths<G: GraphAccess>(
    graph: &G,
    source: NodeIndex,
    target: Option<NodeIndex>,
    as_undirected: bool,
) -> AlgorithmResult<IndexMap<NodeIndex, Vec<NodeIndex>>> {
    dijkstra_shortest_paths_with(graph, source, |_| Ok(1.0), target, as_undirected)
}

/// Dijkstra's Algorithm (Weighted Shortest Path) between two nodes
pub fn dijkstra<G, F, E>(
    graph: &G,
    source: NodeIndex,
    target: NodeIndex,
    mut weight_fn: F,
) -> Result<Option<PathResult>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let search = run_dijkstra(graph, source, Some(target), false, &mut weight_fn)?;
    if !search.settled.contains(&target) {
        return Ok(None);
    }
    Ok(Some(PathResult {
        source,
        target,
        path: reconstruct_path(&search.parents, target),
        cost: search.distances[&target],
    }))
}

/// Length of the k-th shortest walk from `start` to every node.
///
/// Walks may revisit nodes. Nodes reached fewer than `k` times are absent.
/// With `goal`, the search stops once the goal's k-th walk is found.
pub fn k_shortest_path_lengths<G, F, E>(
    graph: &G,
    start: NodeIndex,
    k: usize,
    mut edge_cost: F,
    goal: Option<NodeIndex>,
) -> Result<IndexMap<NodeIndex, f64>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    ensure_node(graph, start)?;
    if k == 0 {
        return Err(AlgorithmError::InvalidArgument("k must be at least 1".to_string()).into());
    }

    let mut counter: HashMap<NodeIndex, usize> = HashMap::new();
    let mut scores = HashMap::new();
    let mut heap = BinaryHeap::new();
    heap.push(State { cost: 0.0, node: start });

    while let Some(State { cost, node }) = heap.pop() {
        let count = counter.entry(node).or_insert(0);
        if *count >= k {
            continue;
        }
        *count += 1;
        if *count == k {
            scores.insert(node, cost);
            if goal == Some(node) {
                break;
            }
        }

        for edge in edges_for_traversal(graph, node, false) {
            let weight = checked_weight(edge_cost(edge.weight)?)?;
            heap.push(State {
                cost: cost + weight,
                node: edge.target,
            });
        }
    }

    let mut nodes: Vec<NodeIndex> = scores.keys().copied().collect();
    nodes.sort();
    Ok(nodes.into_iter().map(|n| (n, scores[&n])).collect())
}
