pub mod all_pairs;
pub mod astar;
pub mod common;
pub mod error;
pub mod isomorphism;
pub mod layout;
pub mod matrix;
pub mod pathfinding;
pub mod traversal;

pub use all_pairs::{floyd_warshall, floyd_warshall_with};
pub use astar::astar_shortest_path;
pub use common::{
    edges_for_traversal, ensure_node, neighbors_for_traversal, Direction, EdgeIndex, EdgeRef, GraphAccess, GraphKind,
    GraphView, NodeIndex,
};
pub use error::{AlgorithmError, AlgorithmResult};
pub use isomorphism::{is_isomorphic, is_isomorphic_node_match};
pub use layout::{spring_layout, spring_layout_with, SpringLayoutConfig};
pub use matrix::{
    adjacency_matrix, adjacency_matrix_with_combiner, distance_matrix, distance_matrix_with_config,
    floyd_warshall_numpy, MatrixConfig,
};
pub use pathfinding::{
    bfs, dijkstra, dijkstra_shortest_path_lengths, dijkstra_shortest_paths, dijkstra_shortest_paths_with,
    k_shortest_path_lengths, PathResult,
};
pub use traversal::{
    all_simple_paths, bfs_successors, dfs_edges, has_path, is_directed_acyclic_graph, topological_sort, DfsEdges,
};
