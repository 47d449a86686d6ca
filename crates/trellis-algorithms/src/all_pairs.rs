//! All-pairs shortest paths
//!
//! Floyd–Warshall over the dense [`GraphView`] projection.

use crate::common::{GraphAccess, GraphView, NodeIndex};
use crate::error::AlgorithmError;
use indexmap::IndexMap;
use tracing::debug;

/// Weighted projection for all-pairs algorithms. Negative weights are
/// allowed, NaN is not.
pub(crate) fn all_pairs_view<G, F, E>(graph: &G, weight_fn: F) -> Result<GraphView, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let view = GraphView::from_graph_weighted(graph, false, weight_fn)?;
    if view.weights.iter().flatten().any(|w| w.is_nan()) {
        return Err(AlgorithmError::InvalidArgument("edge weight must be a number, got NaN".to_string()).into());
    }
    Ok(view)
}

/// Row-major `n * n` distance table, `INFINITY` for unreachable pairs
pub(crate) fn floyd_warshall_dense(view: &GraphView) -> Vec<f64> {
    let n = view.node_count;
    let mut dist = vec![f64::INFINITY; n * n];

    for i in 0..n {
        dist[i * n + i] = 0.0;
        let weights = view.weights(i);
        for (pos, &j) in view.successors(i).iter().enumerate() {
            let w = weights.map(|w| w[pos]).unwrap_or(1.0);
            // Parallel edges: the lightest one wins
            if w < dist[i * n + j] {
                dist[i * n + j] = w;
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let d_ik = dist[i * n + k];
            if d_ik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let candidate = d_ik + dist[k * n + j];
                if candidate < dist[i * n + j] {
                    dist[i * n + j] = candidate;
                }
            }
        }
    }

    debug!("Floyd-Warshall computed {} x {} distance table", n, n);
    dist
}

/// All-pairs shortest path lengths with a custom weight per edge.
///
/// Every live node maps to the nodes reachable from it, itself included at
/// distance 0. Unreachable pairs are omitted. Both maps are ordered by
/// ascending `NodeIndex`.
pub fn floyd_warshall_with<G, F, E>(
    graph: &G,
    weight_fn: F,
) -> Result<IndexMap<NodeIndex, IndexMap<NodeIndex, f64>>, E>
where
    G: GraphAccess,
    F: FnMut(&G::EdgeWeight) -> Result<f64, E>,
    E: From<AlgorithmError>,
{
    let view = all_pairs_view(graph, weight_fn)?;
    let n = view.node_count;
    let dist = floyd_warshall_dense(&view);

    let mut result = IndexMap::with_capacity(n);
    for i in 0..n {
        let row: IndexMap<NodeIndex, f64> = (0..n)
            .filter(|&j| dist[i * n + j].is_finite())
            .map(|j| (view.index_to_node[j], dist[i * n + j]))
            .collect();
        result.insert(view.index_to_node[i], row);
    }
    Ok(result)
}

/// All-pairs shortest path lengths with every edge weighing 1
pub fn floyd_warshall<G: GraphAccess>(graph: &G) -> IndexMap<NodeIndex, IndexMap<NodeIndex, f64>> {
    let view = GraphView::from_graph(graph, false);
    let n = view.node_count;
    let dist = floyd_warshall_dense(&view);

    (0..n)
        .map(|i| {
            let row = (0..n)
                .filter(|&j| dist[i * n + j].is_finite())
                .map(|j| (view.index_to_node[j], dist[i * n + j]))
                .collect();
            (view.index_to_node[i], row)
        })
        .collect()
}
