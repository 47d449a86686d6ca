use trellis::algo::{
    digraph_dijkstra_shortest_path_lengths, dfs_edges, floyd_warshall, is_isomorphic, spring_layout,
    SpringLayoutConfig,
};
use trellis::generators::heavy_square_graph;
use trellis::{GraphError, GraphResult, GraphStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Trellis Graph Engine v{}", trellis::version());
    println!("==========================================");
    println!();

    demo_stable_handles()?;
    demo_heavy_square()?;

    Ok(())
}

fn demo_stable_handles() -> GraphResult<()> {
    println!("=== Demo 1: Stable handles and shortest paths ===");
    let mut graph: GraphStore<&str, f64> = GraphStore::directed();

    let names = ["A", "B", "C", "D", "E", "F"];
    let nodes = graph.add_nodes_from(names);
    for (a, b, w) in [
        (0, 1, 7.0),
        (2, 0, 9.0),
        (0, 3, 14.0),
        (1, 2, 10.0),
        (3, 2, 2.0),
        (3, 4, 9.0),
        (1, 5, 15.0),
        (2, 5, 11.0),
        (4, 5, 6.0),
    ] {
        graph.add_edge(nodes[a], nodes[b], w)?;
    }
    println!("✓ Created {} nodes and {} edges", graph.node_count(), graph.edge_count());

    let lengths = digraph_dijkstra_shortest_path_lengths(&graph, nodes[0], |w| Ok::<f64, GraphError>(*w), None)?;
    for (node, length) in &lengths {
        println!("  A -> {}: {}", graph.node_payload(*node)?, length);
    }

    let removed = graph.remove_node(nodes[2])?;
    println!("✓ Removed {}; E is still {}", removed, graph.node_payload(nodes[4])?);
    println!("  Statistics: {}", serde_json::to_string(&graph.statistics()).unwrap_or_default());
    println!();
    Ok(())
}

fn demo_heavy_square() -> GraphResult<()> {
    println!("=== Demo 2: Heavy square lattice ===");
    let graph = heavy_square_graph(3)?;
    println!("✓ d=3 lattice: {} nodes, {} edges", graph.node_count(), graph.edge_count());

    let tree: Vec<_> = dfs_edges(&graph, None)?.collect();
    println!("  DFS tree edges: {}", tree.len());

    let diameter = floyd_warshall(&graph)
        .values()
        .flat_map(|row| row.values().copied())
        .fold(0.0, f64::max);
    println!("  Diameter: {}", diameter);

    let copy = heavy_square_graph(3)?;
    println!("  Isomorphic to a fresh copy: {}", is_isomorphic(&graph, &copy)?);

    let config = SpringLayoutConfig {
        seed: Some(7),
        ..Default::default()
    };
    let layout = spring_layout(&graph, &config)?;
    if let Some((node, [x, y])) = layout.first() {
        println!("  {} placed at ({:.3}, {:.3})", node, x, y);
    }
    Ok(())
}
