//! Graph algorithms module
//!
//! Algorithms are implemented in the `trellis-algorithms` crate against the
//! `GraphAccess` trait, which `GraphStore` implements. This module provides the
//! integration layer: re-exports plus variant-specific entry points that check
//! the graph's kind before doing any work.

use crate::graph::{GraphKind, GraphStore, NodeIndex};
use indexmap::IndexMap;
use trellis_algorithms::AlgorithmError;

// Re-export algorithms
pub use trellis_algorithms::{
    adjacency_matrix, adjacency_matrix_with_combiner, all_simple_paths, astar_shortest_path, bfs, bfs_successors,
    dfs_edges, dijkstra, dijkstra_shortest_path_lengths, dijkstra_shortest_paths, dijkstra_shortest_paths_with,
    distance_matrix, distance_matrix_with_config, floyd_warshall, floyd_warshall_numpy, floyd_warshall_with, has_path,
    is_directed_acyclic_graph, is_isomorphic, is_isomorphic_node_match, k_shortest_path_lengths, spring_layout,
    spring_layout_with, topological_sort, AlgorithmResult, DfsEdges, GraphView, MatrixConfig, PathResult,
    SpringLayoutConfig,
};

fn expect_kind<N, E>(graph: &GraphStore<N, E>, expected: GraphKind) -> Result<(), AlgorithmError> {
    if graph.kind() == expected {
        Ok(())
    } else {
        Err(AlgorithmError::VariantMismatch {
            expected,
            found: graph.kind(),
        })
    }
}

/// Dijkstra path lengths on a directed graph
pub fn digraph_dijkstra_shortest_path_lengths<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    weight_fn: F,
    target: Option<NodeIndex>,
) -> Result<IndexMap<NodeIndex, f64>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Directed)?;
    dijkstra_shortest_path_lengths(graph, source, weight_fn, target, false)
}

/// Dijkstra path lengths on an undirected graph
pub fn graph_dijkstra_shortest_path_lengths<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    weight_fn: F,
    target: Option<NodeIndex>,
) -> Result<IndexMap<NodeIndex, f64>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Undirected)?;
    dijkstra_shortest_path_lengths(graph, source, weight_fn, target, false)
}

/// Unit-weight Dijkstra paths on a directed graph
pub fn digraph_dijkstra_shortest_paths<N, E>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    target: Option<NodeIndex>,
    as_undirected: bool,
) -> AlgorithmResult<IndexMap<NodeIndex, Vec<NodeIndex>>> {
    expect_kind(graph, GraphKind::Directed)?;
    dijkstra_shortest_paths(graph, source, target, as_undirected)
}

/// Weighted Dijkstra paths on a directed graph
pub fn digraph_dijkstra_shortest_paths_with<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    weight_fn: F,
    target: Option<NodeIndex>,
    as_undirected: bool,
) -> Result<IndexMap<NodeIndex, Vec<NodeIndex>>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Directed)?;
    dijkstra_shortest_paths_with(graph, source, weight_fn, target, as_undirected)
}

/// Unit-weight Dijkstra paths on an undirected graph
pub fn graph_dijkstra_shortest_paths<N, E>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    target: Option<NodeIndex>,
) -> AlgorithmResult<IndexMap<NodeIndex, Vec<NodeIndex>>> {
    expect_kind(graph, GraphKind::Undirected)?;
    dijkstra_shortest_paths(graph, source, target, false)
}

/// Weighted Dijkstra paths on an undirected graph
pub fn graph_dijkstra_shortest_paths_with<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    source: NodeIndex,
    weight_fn: F,
    target: Option<NodeIndex>,
) -> Result<IndexMap<NodeIndex, Vec<NodeIndex>>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Undirected)?;
    dijkstra_shortest_paths_with(graph, source, weight_fn, target, false)
}

/// A* on a directed graph
pub fn digraph_astar_shortest_path<N, E, Goal, Cost, H, Err>(
    graph: &GraphStore<N, E>,
    start: NodeIndex,
    is_goal: Goal,
    edge_cost: Cost,
    estimate_cost: H,
) -> Result<Vec<NodeIndex>, Err>
where
    Goal: FnMut(&N) -> Result<bool, Err>,
    Cost: FnMut(&E) -> Result<f64, Err>,
    H: FnMut(&N) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Directed)?;
    astar_shortest_path(graph, start, is_goal, edge_cost, estimate_cost)
}

/// A* on an undirected graph
pub fn graph_astar_shortest_path<N, E, Goal, Cost, H, Err>(
    graph: &GraphStore<N, E>,
    start: NodeIndex,
    is_goal: Goal,
    edge_cost: Cost,
    estimate_cost: H,
) -> Result<Vec<NodeIndex>, Err>
where
    Goal: FnMut(&N) -> Result<bool, Err>,
    Cost: FnMut(&E) -> Result<f64, Err>,
    H: FnMut(&N) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Undirected)?;
    astar_shortest_path(graph, start, is_goal, edge_cost, estimate_cost)
}

/// Floyd–Warshall on a directed graph
pub fn digraph_floyd_warshall<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    weight_fn: F,
) -> Result<IndexMap<NodeIndex, IndexMap<NodeIndex, f64>>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Directed)?;
    floyd_warshall_with(graph, weight_fn)
}

/// Floyd–Warshall on an undirected graph
pub fn graph_floyd_warshall<N, E, F, Err>(
    graph: &GraphStore<N, E>,
    weight_fn: F,
) -> Result<IndexMap<NodeIndex, IndexMap<NodeIndex, f64>>, Err>
where
    F: FnMut(&E) -> Result<f64, Err>,
    Err: From<AlgorithmError>,
{
    expect_kind(graph, GraphKind::Undirected)?;
    floyd_warshall_with(graph, weight_fn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphError, GraphResult};

    fn weighted(kind: GraphKind) -> GraphStore<&'static str, f64> {
        let config = crate::graph::GraphConfig {
            kind,
            ..Default::default()
        };
        let mut graph = GraphStore::new(config);
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b, 2.0).unwrap();
        graph.add_edge(c, b, 1.0).unwrap();
        graph
    }

    fn weight(w: &f64) -> GraphResult<f64> {
        Ok(*w)
    }

    #[test]
    fn test_variant_checked_entry_points() {
        let directed = weighted(GraphKind::Directed);
        let undirected = weighted(GraphKind::Undirected);
        let a = NodeIndex::new(0);

        let lengths = digraph_dijkstra_shortest_path_lengths(&directed, a, weight, None).unwrap();
        assert_eq!(lengths.len(), 1);

        let lengths = graph_dijkstra_shortest_path_lengths(&undirected, a, weight, None).unwrap();
        assert_eq!(lengths[&NodeIndex::new(2)], 3.0);

        let err = graph_dijkstra_shortest_path_lengths(&directed, a, weight, None).unwrap_err();
        assert_eq!(
            err,
            GraphError::Algorithm(AlgorithmError::VariantMismatch {
                expected: GraphKind::Undirected,
                found: GraphKind::Directed,
            })
        );

        assert!(matches!(
            digraph_dijkstra_shortest_paths(&undirected, a, None, false),
            Err(AlgorithmError::VariantMismatch { .. })
        ));
        assert!(graph_dijkstra_shortest_paths(&undirected, a, None).is_ok());
    }

    #[test]
    fn test_astar_entry_points() {
        let undirected = weighted(GraphKind::Undirected);
        let path = graph_astar_shortest_path(
            &undirected,
            NodeIndex::new(0),
            |n: &&str| Ok::<bool, GraphError>(*n == "C"),
            weight,
            |_| Ok(0.0),
        )
        .unwrap();
        assert_eq!(path, vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)]);

        let err = digraph_astar_shortest_path(&undirected, NodeIndex::new(0), |_| Ok(true), weight, |_| Ok(0.0))
            .unwrap_err();
        assert!(matches!(err, GraphError::Algorithm(AlgorithmError::VariantMismatch { .. })));
    }

    #[test]
    fn test_callback_failure_propagates() {
        let directed = weighted(GraphKind::Directed);
        let err = digraph_floyd_warshall(&directed, |_: &f64| -> GraphResult<f64> {
            Err(GraphError::CallbackFailure("weight lookup failed".to_string()))
        })
        .unwrap_err();
        assert_eq!(err, GraphError::CallbackFailure("weight lookup failed".to_string()));

        let all = graph_floyd_warshall(&weighted(GraphKind::Undirected), weight).unwrap();
        assert_eq!(all[&NodeIndex::new(0)][&NodeIndex::new(2)], 3.0);
    }
}
