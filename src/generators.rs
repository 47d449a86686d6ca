//! Graph generators
//!
//! Every generator builds a fresh graph with `()` payloads. Nodes are created
//! first, in the documented order, then edges; the same arguments (and seed,
//! for random graphs) always give the same graph.

use crate::graph::{GraphConfig, GraphError, GraphKind, GraphResult, GraphStore, NodeIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

fn build(
    kind: GraphKind,
    node_count: usize,
    edges: impl IntoIterator<Item = (usize, usize)>,
) -> GraphResult<GraphStore<(), ()>> {
    let config = GraphConfig {
        kind,
        ..GraphConfig::default()
    };
    let mut graph = GraphStore::new(config);
    graph.add_nodes_from(std::iter::repeat(()).take(node_count));
    graph.add_edges_from(
        edges
            .into_iter()
            .map(|(a, b)| (NodeIndex::new(a), NodeIndex::new(b), ())),
    )?;
    Ok(graph)
}

/// Node layout of a heavy square lattice with code distance `d`
struct HeavySquare {
    d: usize,
}

impl HeavySquare {
    fn new(d: usize) -> GraphResult<Self> {
        if d == 0 {
            return Err(GraphError::InvalidArgument(
                "heavy square graph needs a positive code distance d".to_string(),
            ));
        }
        Ok(HeavySquare { d })
    }

    fn node_count(&self) -> usize {
        3 * self.d * self.d - 2 * self.d
    }

    fn data(&self, row: usize, col: usize) -> usize {
        row * self.d + col
    }

    /// Flag node on the horizontal link right of `(row, col)`
    fn flag(&self, row: usize, col: usize) -> usize {
        self.d * self.d + row * (self.d - 1) + col
    }

    /// Syndrome node on the vertical link below `(row, col)`
    fn syndrome(&self, row: usize, col: usize) -> usize {
        self.d * self.d + self.d * (self.d - 1) + row * self.d + col
    }

    /// Links as (from, via, to) chains: horizontal ones first, then vertical
    fn links(&self) -> Vec<(usize, usize, usize)> {
        let d = self.d;
        let mut links = Vec::with_capacity(2 * d * (d - 1));
        for row in 0..d {
            for col in 0..d - 1 {
                links.push((self.data(row, col), self.flag(row, col), self.data(row, col + 1)));
            }
        }
        for row in 0..d - 1 {
            for col in 0..d {
                links.push((self.data(row, col), self.syndrome(row, col), self.data(row + 1, col)));
            }
        }
        links
    }
}

/// Heavy square lattice for a surface code of distance `d`.
///
/// A `d x d` grid of data nodes where every horizontal link passes through a
/// flag node and every vertical link through a syndrome node, giving
/// `3d² - 2d` nodes and `4d(d - 1)` edges. Data nodes come first (row-major),
/// then flag nodes, then syndrome nodes. `d = 0` fails with `InvalidArgument`.
pub fn heavy_square_graph(d: usize) -> GraphResult<GraphStore<(), ()>> {
    let lattice = HeavySquare::new(d)?;
    let edges = lattice
        .links()
        .into_iter()
        .flat_map(|(from, via, to)| [(from, via), (via, to)]);
    let graph = build(GraphKind::Undirected, lattice.node_count(), edges)?;
    debug!(
        "Generated heavy square graph d={} with {} nodes and {} edges",
        d,
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Directed heavy square lattice, links pointing right and down.
///
/// With `bidirectional` every link also gets the reverse edges.
pub fn directed_heavy_square_graph(d: usize, bidirectional: bool) -> GraphResult<GraphStore<(), ()>> {
    let lattice = HeavySquare::new(d)?;
    let mut edges = Vec::new();
    for (from, via, to) in lattice.links() {
        edges.push((from, via));
        edges.push((via, to));
        if bidirectional {
            edges.push((via, from));
            edges.push((to, via));
        }
    }
    build(GraphKind::Directed, lattice.node_count(), edges)
}

fn path_edges(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..n).map(|i| (i - 1, i))
}

fn cycle_edges(n: usize) -> impl Iterator<Item = (usize, usize)> {
    // A single node gets no self-loop
    path_edges(n).chain((n > 1).then(|| (n - 1, 0)))
}

fn grid_edges(rows: usize, cols: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let node = row * cols + col;
            if col + 1 < cols {
                edges.push((node, node + 1));
            }
            if row + 1 < rows {
                edges.push((node, node + cols));
            }
        }
    }
    edges
}

/// Path `0 - 1 - ... - (n-1)`
pub fn path_graph(n: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Undirected, n, path_edges(n))
}

pub fn directed_path_graph(n: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Directed, n, path_edges(n))
}

/// Path closed back to node 0
pub fn cycle_graph(n: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Undirected, n, cycle_edges(n))
}

pub fn directed_cycle_graph(n: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Directed, n, cycle_edges(n))
}

/// Node 0 connected to each of the other `n - 1` nodes
pub fn star_graph(n: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Undirected, n, (1..n).map(|leaf| (0, leaf)))
}

/// Star with edges pointing out of the center, or into it with `inward`
pub fn directed_star_graph(n: usize, inward: bool) -> GraphResult<GraphStore<(), ()>> {
    let edges = (1..n).map(move |leaf| if inward { (leaf, 0) } else { (0, leaf) });
    build(GraphKind::Directed, n, edges)
}

/// `rows x cols` lattice, nodes numbered row-major
pub fn grid_graph(rows: usize, cols: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Undirected, rows * cols, grid_edges(rows, cols))
}

/// Grid with edges pointing right and down
pub fn directed_grid_graph(rows: usize, cols: usize) -> GraphResult<GraphStore<(), ()>> {
    build(GraphKind::Directed, rows * cols, grid_edges(rows, cols))
}

fn gnp_rng(p: f64, seed: Option<u64>) -> GraphResult<StdRng> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::InvalidArgument(format!("probability must be in [0, 1], got {}", p)));
    }
    Ok(match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    })
}

/// Erdős–Rényi G(n, p): each unordered pair is joined with probability `p`
pub fn gnp_random_graph(n: usize, p: f64, seed: Option<u64>) -> GraphResult<GraphStore<(), ()>> {
    let mut rng = gnp_rng(p, seed)?;
    let mut edges = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen::<f64>() < p {
                edges.push((i, j));
            }
        }
    }
    build(GraphKind::Undirected, n, edges)
}

/// Directed G(n, p): each ordered pair of distinct nodes gets an edge with
/// probability `p`
pub fn directed_gnp_random_graph(n: usize, p: f64, seed: Option<u64>) -> GraphResult<GraphStore<(), ()>> {
    let mut rng = gnp_rng(p, seed)?;
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j && rng.gen::<f64>() < p {
                edges.push((i, j));
            }
        }
    }
    build(GraphKind::Directed, n, edges)
}
