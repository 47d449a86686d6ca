use trellis::algo::{digraph_dijkstra_shortest_path_lengths, topological_sort};
use trellis::{EdgeIndex, GraphConfig, GraphError, GraphKind, GraphResult, GraphStore, NodeIndex};

#[test]
fn test_handles_survive_removals() {
    let mut graph: GraphStore<String, u32> = GraphStore::directed();
    let nodes: Vec<NodeIndex> = (0..5).map(|i| graph.add_node(format!("n{}", i))).collect();
    for pair in nodes.windows(2) {
        graph.add_edge(pair[0], pair[1], 1).unwrap();
    }

    assert_eq!(graph.remove_node(nodes[2]).unwrap(), "n2");
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 2);

    // Untouched handles still resolve to the same payloads
    assert_eq!(graph.node_payload(nodes[4]).unwrap(), "n4");
    assert_eq!(graph.node_payload(nodes[2]), Err(GraphError::NodeNotFound(nodes[2])));

    // New elements never reuse a freed slot
    let fresh = graph.add_node("fresh".to_string());
    assert_eq!(fresh, NodeIndex::new(5));
    let edge = graph.add_edge(nodes[1], fresh, 7).unwrap();
    assert_eq!(edge, EdgeIndex::new(4));
    assert_eq!(graph.node_indices(), vec![nodes[0], nodes[1], nodes[3], nodes[4], fresh]);

    let stats = graph.statistics();
    assert_eq!(stats.removed_nodes, 1);
    assert_eq!(stats.removed_edges, 2);
}

#[test]
fn test_algorithms_see_live_nodes_only() {
    let mut graph: GraphStore<&str, f64> = GraphStore::directed();
    let a = graph.add_node("A");
    let b = graph.add_child(a, "B", 1.0).unwrap();
    let c = graph.add_child(b, "C", 1.0).unwrap();
    let shortcut = graph.add_edge(a, c, 5.0).unwrap();

    let weight = |w: &f64| GraphResult::Ok(*w);
    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, a, weight, None).unwrap();
    assert_eq!(lengths[&c], 2.0);

    graph.remove_node(b).unwrap();
    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, a, weight, None).unwrap();
    assert_eq!(lengths[&c], 5.0);
    assert!(!lengths.contains_key(&b));

    assert_eq!(graph.remove_edge(shortcut).unwrap(), 5.0);
    assert!(digraph_dijkstra_shortest_path_lengths(&graph, a, weight, None).unwrap().is_empty());

    let err = digraph_dijkstra_shortest_path_lengths(&graph, b, weight, None).unwrap_err();
    assert!(matches!(err, GraphError::Algorithm(_)));
}

#[test]
fn test_child_and_parent_helpers() {
    let mut graph: GraphStore<&str, &str> = GraphStore::directed();
    let root = graph.add_node("root");
    let child = graph.add_child(root, "child", "down").unwrap();
    let parent = graph.add_parent(root, "parent", "up").unwrap();

    assert_eq!(graph.successors(root).unwrap(), vec![child]);
    assert_eq!(graph.predecessors(root).unwrap(), vec![parent]);
    assert_eq!(topological_sort(&graph).unwrap(), vec![parent, root, child]);

    let missing = NodeIndex::new(99);
    assert_eq!(graph.add_child(missing, "x", "y"), Err(GraphError::NodeNotFound(missing)));
    assert_eq!(graph.node_count(), 3);
}

#[test]
fn test_undirected_view() {
    let mut graph: GraphStore<(), ()> = GraphStore::undirected();
    let nodes = graph.add_nodes_from([(), (), ()]);
    graph.add_edge(nodes[1], nodes[0], ()).unwrap();
    graph.add_edge(nodes[1], nodes[2], ()).unwrap();
    graph.add_edge(nodes[2], nodes[2], ()).unwrap();

    assert!(graph.has_edge(nodes[0], nodes[1]));
    assert_eq!(graph.neighbors(nodes[1]).unwrap(), vec![nodes[0], nodes[2]]);
    assert_eq!(graph.degree(nodes[2]), Ok(3));
    assert_eq!(graph.in_degree(nodes[2]), graph.out_degree(nodes[2]));
    assert_eq!(graph.statistics().self_loops, 1);

    graph.remove_edge_between(nodes[0], nodes[1]).unwrap();
    assert_eq!(
        graph.remove_edge_between(nodes[0], nodes[1]),
        Err(GraphError::NoEdgeBetween(nodes[0], nodes[1]))
    );
}

#[test]
fn test_cycle_checked_batches_are_atomic() {
    let mut graph: GraphStore<(), u8> = GraphStore::new(GraphConfig::dag());
    let nodes = graph.add_nodes_from([(), (), ()]);
    graph.add_edge(nodes[0], nodes[1], 0).unwrap();

    let batch = [(nodes[1], nodes[2], 1), (nodes[2], nodes[0], 2)];
    assert_eq!(graph.add_edges_from(batch), Err(GraphError::DagWouldCycle));
    assert_eq!(graph.edge_count(), 1);

    let batch = [(nodes[1], nodes[2], 1), (nodes[2], NodeIndex::new(7), 2)];
    assert_eq!(
        graph.add_edges_from(batch),
        Err(GraphError::InvalidEdgeTarget(NodeIndex::new(7)))
    );
    assert_eq!(graph.edge_count(), 1);

    // Dropping the check allows the cycle, re-enabling it is then refused
    graph.set_check_cycle(false).unwrap();
    graph.add_edges_from([(nodes[1], nodes[2], 1), (nodes[2], nodes[0], 2)]).unwrap();
    assert_eq!(graph.set_check_cycle(true), Err(GraphError::DagWouldCycle));
}

#[test]
fn test_simple_graph_replaces_payload() {
    let config = GraphConfig {
        kind: GraphKind::Undirected,
        multigraph: false,
        ..Default::default()
    };
    let mut graph: GraphStore<(), &str> = GraphStore::new(config);
    let nodes = graph.add_nodes_from([(), ()]);
    let first = graph.add_edge(nodes[0], nodes[1], "old").unwrap();
    let second = graph.add_edge(nodes[1], nodes[0], "new").unwrap();

    assert_eq!(first, second);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edge_payload(first), Ok(&"new"));
}
