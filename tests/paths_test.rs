use indexmap::IndexMap;
use trellis::algo::{
    astar_shortest_path, digraph_astar_shortest_path, digraph_dijkstra_shortest_path_lengths,
    digraph_dijkstra_shortest_paths, digraph_dijkstra_shortest_paths_with, dijkstra_shortest_path_lengths,
    distance_matrix, floyd_warshall_numpy, floyd_warshall_with, graph_astar_shortest_path,
    graph_dijkstra_shortest_path_lengths, graph_dijkstra_shortest_paths, k_shortest_path_lengths,
};
use trellis::generators::{directed_gnp_random_graph, heavy_square_graph};
use trellis::{AlgorithmError, GraphConfig, GraphError, GraphKind, GraphResult, GraphStore, NodeIndex};

fn n(i: usize) -> NodeIndex {
    NodeIndex::new(i)
}

fn letters(kind: GraphKind) -> GraphStore<&'static str, f64> {
    let mut graph = GraphStore::new(GraphConfig {
        kind,
        ..Default::default()
    });
    let nodes = graph.add_nodes_from(["A", "B", "C", "D", "E", "F"]);
    graph
        .add_edges_from(
            [
                (0, 1, 7.0),
                (2, 0, 9.0),
                (0, 3, 14.0),
                (1, 2, 10.0),
                (3, 2, 2.0),
                (3, 4, 9.0),
                (1, 5, 15.0),
                (2, 5, 11.0),
                (4, 5, 6.0),
            ]
            .map(|(a, b, w)| (nodes[a], nodes[b], w)),
        )
        .unwrap();
    graph
}

fn weight(w: &f64) -> GraphResult<f64> {
    Ok(*w)
}

fn unit(_: &f64) -> GraphResult<f64> {
    Ok(1.0)
}

#[test]
fn test_digraph_dijkstra_to_target() {
    let graph = letters(GraphKind::Directed);
    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, n(0), weight, Some(n(4))).unwrap();
    assert_eq!(lengths, IndexMap::from([(n(4), 23.0)]));

    let paths = digraph_dijkstra_shortest_paths_with(&graph, n(0), weight, Some(n(4)), false).unwrap();
    assert_eq!(paths, IndexMap::from([(n(4), vec![n(0), n(3), n(4)])]));
}

#[test]
fn test_digraph_dijkstra_all_paths() {
    let graph = letters(GraphKind::Directed);
    let paths = digraph_dijkstra_shortest_paths_with(&graph, n(0), weight, None, false).unwrap();
    let expected = IndexMap::from([
        (n(1), vec![n(0), n(1)]),
        (n(2), vec![n(0), n(3), n(2)]),
        (n(3), vec![n(0), n(3)]),
        (n(4), vec![n(0), n(3), n(4)]),
        (n(5), vec![n(0), n(1), n(5)]),
    ]);
    assert_eq!(paths, expected);

    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, n(0), unit, None).unwrap();
    let expected = IndexMap::from([(n(1), 1.0), (n(2), 2.0), (n(3), 1.0), (n(4), 2.0), (n(5), 2.0)]);
    assert_eq!(lengths, expected);
}

#[test]
fn test_digraph_dijkstra_as_undirected() {
    let graph = letters(GraphKind::Directed);
    let paths = digraph_dijkstra_shortest_paths(&graph, n(0), None, true).unwrap();
    assert_eq!(paths[&n(2)], vec![n(0), n(2)]);
    assert_eq!(paths[&n(4)], vec![n(0), n(3), n(4)]);
    assert_eq!(paths[&n(5)], vec![n(0), n(1), n(5)]);
}

#[test]
fn test_graph_dijkstra() {
    let graph = letters(GraphKind::Undirected);
    let lengths = graph_dijkstra_shortest_path_lengths(&graph, n(0), weight, Some(n(4))).unwrap();
    assert_eq!(lengths, IndexMap::from([(n(4), 20.0)]));

    let lengths = graph_dijkstra_shortest_path_lengths(&graph, n(0), unit, None).unwrap();
    let expected = IndexMap::from([(n(1), 1.0), (n(2), 1.0), (n(3), 1.0), (n(4), 2.0), (n(5), 2.0)]);
    assert_eq!(lengths, expected);

    let paths = graph_dijkstra_shortest_paths(&graph, n(0), None).unwrap();
    assert_eq!(paths[&n(2)], vec![n(0), n(2)]);
    assert_eq!(paths[&n(4)], vec![n(0), n(3), n(4)]);
}

#[test]
fn test_dijkstra_no_path_and_disconnected() {
    let mut graph: GraphStore<&str, f64> = GraphStore::directed();
    let a = graph.add_node("A");
    graph.add_node("B");
    assert!(digraph_dijkstra_shortest_path_lengths(&graph, a, weight, None).unwrap().is_empty());

    let b = graph.add_child(a, "B", 1.2).unwrap();
    graph.add_node("C");
    graph.add_parent(b, "D", 2.4).unwrap();
    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, a, weight, None).unwrap();
    assert_eq!(lengths, IndexMap::from([(b, 1.2)]));
}

#[test]
fn test_dijkstra_variant_mismatch() {
    let mut graph: GraphStore<i32, f64> = GraphStore::undirected();
    graph.add_node(0);
    let err = digraph_dijkstra_shortest_path_lengths(&graph, n(0), weight, None).unwrap_err();
    assert_eq!(
        err,
        GraphError::Algorithm(AlgorithmError::VariantMismatch {
            expected: GraphKind::Directed,
            found: GraphKind::Undirected,
        })
    );
}

#[test]
fn test_astar_matches_expected_paths() {
    let directed = letters(GraphKind::Directed);
    let path =
        digraph_astar_shortest_path(&directed, n(0), |p: &&str| Ok(*p == "E"), weight, |_: &&str| Ok(0.0)).unwrap();
    assert_eq!(path, vec![n(0), n(3), n(4)]);

    let undirected = letters(GraphKind::Undirected);
    let path =
        graph_astar_shortest_path(&undirected, n(0), |p: &&str| Ok(*p == "E"), weight, |_: &&str| Ok(0.0)).unwrap();
    assert_eq!(path, vec![n(0), n(2), n(3), n(4)]);
}

#[test]
fn test_astar_with_zero_heuristic_agrees_with_dijkstra() {
    for kind in [GraphKind::Directed, GraphKind::Undirected] {
        let graph = letters(kind);
        let lengths = dijkstra_shortest_path_lengths(&graph, n(0), weight, None, false).unwrap();
        for (target, length) in &lengths {
            let goal = *graph.node_payload(*target).unwrap();
            let path = astar_shortest_path(&graph, n(0), |p: &&str| Ok(*p == goal), weight, |_: &&str| Ok(0.0))
                .unwrap();
            let cost: f64 = path
                .windows(2)
                .map(|pair| *graph.edge_payload(graph.find_edge(pair[0], pair[1]).unwrap()).unwrap())
                .sum();
            assert_eq!(cost, *length);
        }
    }
}

#[test]
fn test_astar_no_goal_reachable() {
    let graph = letters(GraphKind::Directed);
    let path = astar_shortest_path(&graph, n(5), |p: &&str| Ok(*p == "A"), weight, |_: &&str| Ok(0.0));
    assert_eq!(path, Err(GraphError::Algorithm(AlgorithmError::NoPathFound)));
}

#[test]
fn test_dijkstra_agrees_with_floyd_warshall() {
    let graph = directed_gnp_random_graph(25, 0.2, Some(42)).unwrap();
    let all = floyd_warshall_with(&graph, |_: &()| GraphResult::Ok(1.0)).unwrap();

    for source in graph.node_indices() {
        let lengths = dijkstra_shortest_path_lengths(&graph, source, |_: &()| GraphResult::Ok(1.0), None, false)
            .unwrap();
        for (target, length) in &lengths {
            assert_eq!(all[&source][target], *length);
        }
        // Floyd-Warshall also lists the source itself
        assert_eq!(all[&source].len(), lengths.len() + 1);
    }
}

#[test]
fn test_dense_matrices_agree_on_unit_weights() {
    let graph = heavy_square_graph(3).unwrap();
    let hops = distance_matrix(&graph, false);
    let weighted = floyd_warshall_numpy(&graph, |_: &()| GraphResult::Ok(1.0)).unwrap();
    assert_eq!(hops, weighted);
    assert_eq!(hops.dim(), (21, 21));
    assert!(hops.iter().all(|d| d.is_finite()));
}

#[test]
fn test_k_shortest_path_lengths() {
    let graph = letters(GraphKind::Directed);
    let second = k_shortest_path_lengths(&graph, n(0), 2, weight, None).unwrap();
    // A -> D -> C costs 16, the runner-up A -> B -> C costs 17
    assert_eq!(second[&n(2)], 17.0);
}
