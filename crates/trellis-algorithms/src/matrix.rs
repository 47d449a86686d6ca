//! Dense matrix outputs
//!
//! Rows and columns follow ascending live `NodeIndex` order, the same order as
//! [`GraphView::index_to_node`].

use crate::all_pairs::{all_pairs_view, floyd_warshall_dense};
use crate::common::{GraphAccess, GraphView};
use crate::error::AlgorithmError;
use ndarray::Array2;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::Deserialize;
use std::collections::VecDeque;
use tracing::debug;

/// Matrix computation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatrixConfig {
    /// Node count at which `distance_matrix` spreads rows across the rayon pool
    pub parallel_threshold: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 300,
        }
    }
}

/// Weighted adjacency matrix. Parallel edges are summed, absent edges are 0.
pub fn adjacency_matrix<G, F, E>(graph: &G, weight_fn: F) -> Result<Array2<f64>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
{
    adjacency_matrix_with_combiner(graph, weight_fn, |acc, w| acc + w)
}

/// Weighted adjacency matrix folding parallel edges with `combine`.
///
/// The first edge between a pair sets the cell and later ones are combined
/// into it in edge index order. Undirected graphs yield a symmetric matrix.
pub fn adjacency_matrix_with_combiner<G, F, C, E>(
    graph: &G,
    mut weight_fn: F,
    mut combine: C,
) -> Result<Array2<f64>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    C: FnMut(f64, f64) -> f64,
{
    let nodes = graph.node_indices();
    let n = nodes.len();
    let position = |node| nodes.binary_search(&node).ok();

    let mut matrix = Array2::<f64>::zeros((n, n));
    let mut filled = Array2::<bool>::from_elem((n, n), false);

    for edge in graph.edge_references() {
        let (Some(i), Some(j)) = (position(edge.source), position(edge.target)) else {
            continue;
        };
        let weight = weight_fn(edge.weight)?;

        let mut cells = vec![(i, j)];
        if !graph.is_directed() && i != j {
            cells.push((j, i));
        }
        for cell in cells {
            matrix[cell] = if filled[cell] { combine(matrix[cell], weight) } else { weight };
            filled[cell] = true;
        }
    }

    Ok(matrix)
}

/// Hop counts between every pair of nodes.
///
/// Unreachable pairs are `f64::INFINITY` and the diagonal is 0.
pub fn distance_matrix<G: GraphAccess>(graph: &G, as_undirected: bool) -> Array2<f64> {
    distance_matrix_with_config(graph, as_undirected, &MatrixConfig::default())
}

pub fn distance_matrix_with_config<G: GraphAccess>(
    graph: &G,
    as_undirected: bool,
    config: &MatrixConfig,
) -> Array2<f64> {
    let view = GraphView::from_graph(graph, as_undirected);
    let n = view.node_count;

    let rows: Vec<Vec<f64>> = if n >= config.parallel_threshold {
        debug!("Computing {} distance rows in parallel", n);
        (0..n).into_par_iter().map(|source| hop_counts(&view, source)).collect()
    } else {
        (0..n).map(|source| hop_counts(&view, source)).collect()
    };

    Array2::from_shape_fn((n, n), |(i, j)| rows[i][j])
}

fn hop_counts(view: &GraphView, source: usize) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; view.node_count];
    let mut queue = VecDeque::new();
    dist[source] = 0.0;
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &v in view.successors(u) {
            if dist[v].is_infinite() {
                dist[v] = dist[u] + 1.0;
                queue.push_back(v);
            }
        }
    }
    dist
}

/// Weighted all-pairs shortest path lengths as a dense matrix.
///
/// Unreachable pairs are `f64::INFINITY`. Parallel edges keep the minimum.
pub fn floyd_warshall_numpy<G, F, E>(graph: &G, weight_fn: F) -> Result<Array2<f64>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let view = all_pairs_view(graph, weight_fn)?;
    let n = view.node_count;
    let dist = floyd_warshall_dense(&view);
    Ok(Array2::from_shape_fn((n, n), |(i, j)| dist[i * n + j]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::TestGraph;
    use crate::common::NodeIndex;

    fn unit(_: &f64) -> Result<f64, AlgorithmError> {
        Ok(1.0)
    }

    fn weight(w: &f64) -> Result<f64, AlgorithmError> {
        Ok(*w)
    }

    #[test]
    fn test_adjacency_matrix_directed_sums_parallel_edges() {
        let mut graph = TestGraph::directed();
        let a = graph.add_node(());
        let b = graph.add_node(());
        graph.add_edge(a, b, 2.0);
        graph.add_edge(a, b, 3.0);

        let matrix = adjacency_matrix(&graph, weight).unwrap();
        assert_eq!(matrix[[0, 1]], 5.0);
        assert_eq!(matrix[[1, 0]], 0.0);

        let matrix = adjacency_matrix_with_combiner(&graph, weight, f64::max).unwrap();
        assert_eq!(matrix[[0, 1]], 3.0);
    }

    #[test]
    fn test_adjacency_matrix_undirected_is_symmetric() {
        let mut graph = TestGraph::undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 1.5);
        graph.add_edge(c, b, 4.0);
        graph.add_edge(c, c, 1.0);

        let matrix = adjacency_matrix(&graph, weight).unwrap();
        assert_eq!(matrix, matrix.t());
        assert_eq!(matrix[[1, 2]], 4.0);
        assert_eq!(matrix[[2, 2]], 1.0);
    }

    #[test]
    fn test_adjacency_matrix_skips_removed_nodes() {
        let mut graph = TestGraph::directed();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 1.0);
        graph.add_edge(a, c, 1.0);
        graph.remove_node(b);

        let matrix = adjacency_matrix(&graph, unit).unwrap();
        assert_eq!(matrix.dim(), (2, 2));
        assert_eq!(matrix[[0, 1]], 1.0);
    }

    #[test]
    fn test_distance_matrix() {
        let mut graph = TestGraph::directed();
        for _ in 0..4 {
            graph.add_node(());
        }
        graph.add_edge(NodeIndex::new(0), NodeIndex::new(1), 1.0);
        graph.add_edge(NodeIndex::new(1), NodeIndex::new(2), 1.0);

        let matrix = distance_matrix(&graph, false);
        assert_eq!(matrix[[0, 2]], 2.0);
        assert_eq!(matrix[[2, 0]], f64::INFINITY);
        assert_eq!(matrix[[3, 3]], 0.0);
        assert_eq!(matrix[[0, 3]], f64::INFINITY);

        let matrix = distance_matrix(&graph, true);
        assert_eq!(matrix[[2, 0]], 2.0);
    }

    #[test]
    fn test_distance_matrix_parallel_matches_sequential() {
        let mut graph = TestGraph::undirected();
        for _ in 0..20 {
            graph.add_node(());
        }
        for i in 0..19 {
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(i + 1), 1.0);
        }

        let sequential = distance_matrix(&graph, false);
        let parallel = distance_matrix_with_config(&graph, false, &MatrixConfig { parallel_threshold: 1 });
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[[0, 19]], 19.0);
    }

    #[test]
    fn test_floyd_warshall_numpy() {
        let mut graph = TestGraph::directed();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 1.0);
        graph.add_edge(b, c, 1.0);
        graph.add_edge(a, c, 5.0);

        let matrix = floyd_warshall_numpy(&graph, weight).unwrap();
        assert_eq!(matrix[[0, 2]], 2.0);
        assert_eq!(matrix[[2, 0]], f64::INFINITY);
        assert_eq!(matrix[[1, 1]], 0.0);
    }
}
