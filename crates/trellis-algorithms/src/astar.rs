//! A* search
//!
//! Goal-directed shortest path search driven by caller callbacks. The open set
//! is ordered by `g + h`, lowest `NodeIndex` first on ties.

use crate::common::{edges_for_traversal, ensure_node, GraphAccess, NodeIndex};
use crate::error::{checked_weight, AlgorithmError};
use crate::pathfinding::State;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, HashSet};
use tracing::debug;

/// Find the cheapest path from `start` to the first node whose payload
/// satisfies `is_goal`.
///
/// `estimate_cost` must be admissible for the result to be optimal; this is
/// not checked. The returned path includes both `start` and the goal node.
/// Fails with [`AlgorithmError::NoPathFound`] when no goal node is reachable.
pub fn astar_shortest_path<G, Goal, Cost, H, E>(
    graph: &G,
    start: NodeIndex,
    mut is_goal: Goal,
    mut edge_cost: Cost,
    mut estimate_cost: H,
) -> Result<Vec<NodeIndex>, E>
where
    G: GraphAccess,
    Goal: FnMut(&G::NodeWeight) -> Result<bool, E>,
    Cost: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    H: FnMut(&G::NodeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    ensure_node(graph, start)?;

    let mut visited = HashSet::new();
    let mut scores: HashMap<NodeIndex, f64> = HashMap::new();
    let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut open = BinaryHeap::new();

    let payload = move |node: NodeIndex| graph.node_weight(node).ok_or(AlgorithmError::NodeNotFound(node));

    scores.insert(start, 0.0);
    open.push(State {
        cost: estimate_cost(payload(start)?)?,
        node: start,
    });

    while let Some(State { node, .. }) = open.pop() {
        if visited.contains(&node) {
            continue;
        }

        if is_goal(payload(node)?)? {
            let mut path = vec![node];
            let mut current = node;
            while let Some(&prev) = parents.get(&current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            debug!("A* reached {} after expanding {} nodes", node, visited.len());
            return Ok(path);
        }

        let node_score = scores[&node];

        for edge in edges_for_traversal(graph, node, false) {
            let next = edge.target;
            if visited.contains(&next) {
                continue;
            }

            let next_score = node_score + checked_weight(edge_cost(edge.weight)?)?;

            match scores.entry(next) {
                Entry::Occupied(mut entry) => {
                    if next_score < *entry.get() {
                        entry.insert(next_score);
                        parents.insert(next, node);
                    } else {
                        continue;
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(next_score);
                    parents.insert(next, node);
                }
            }

            let estimate = next_score + estimate_cost(payload(next)?)?;
            open.push(State {
                cost: estimate,
                node: next,
            });
        }

        visited.insert(node);
    }

    Err(AlgorithmError::NoPathFound.into())
}
