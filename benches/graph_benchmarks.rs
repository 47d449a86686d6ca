use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trellis::algo::{
    dfs_edges, dijkstra_shortest_path_lengths, distance_matrix, floyd_warshall, is_isomorphic, spring_layout,
    SpringLayoutConfig,
};
use trellis::generators::{grid_graph, heavy_square_graph};
use trellis::{GraphResult, GraphStore, NodeIndex};

/// Benchmark node and edge insertion throughput
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut store: GraphStore<usize, f64> = GraphStore::directed();
                let mut previous = store.add_node(0);
                for i in 1..size {
                    let node = store.add_node(i);
                    store.add_edge(previous, node, i as f64).ok();
                    previous = node;
                }
                black_box(store.edge_count());
            });
        });
    }
    group.finish();
}

/// Benchmark insertion followed by removal of every other node
fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut store = grid_graph(size / 10, 10).unwrap_or_default();
                for i in (0..size).step_by(2) {
                    store.remove_node(NodeIndex::new(i)).ok();
                }
                black_box(store.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark single-source shortest paths on heavy square lattices
fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");

    for d in [5, 11, 21].iter() {
        let graph = heavy_square_graph(*d).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("heavy_square", d), d, |b, _| {
            b.iter(|| {
                let lengths =
                    dijkstra_shortest_path_lengths(&graph, NodeIndex::new(0), |_: &()| GraphResult::Ok(1.0), None, false);
                black_box(lengths.map(|l| l.len()).unwrap_or(0));
            });
        });
    }
    group.finish();
}

/// Benchmark all-pairs distances, sequential Floyd–Warshall against BFS rows
fn bench_all_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_pairs");
    group.sample_size(10);

    for d in [5, 9].iter() {
        let graph = heavy_square_graph(*d).unwrap_or_default();
        group.bench_with_input(BenchmarkId::new("floyd_warshall", d), d, |b, _| {
            b.iter(|| black_box(floyd_warshall(&graph).len()));
        });
        group.bench_with_input(BenchmarkId::new("distance_matrix", d), d, |b, _| {
            b.iter(|| black_box(distance_matrix(&graph, false).len()));
        });
    }
    group.finish();
}

/// Benchmark traversal and isomorphism on lattices
fn bench_structure(c: &mut Criterion) {
    let mut group = c.benchmark_group("structure");

    let graph = heavy_square_graph(9).unwrap_or_default();
    let copy = heavy_square_graph(9).unwrap_or_default();

    group.bench_function("dfs_edges", |b| {
        b.iter(|| black_box(dfs_edges(&graph, None).map(|edges| edges.count()).unwrap_or(0)));
    });
    group.bench_function("is_isomorphic", |b| {
        b.iter(|| black_box(is_isomorphic(&graph, &copy).unwrap_or(false)));
    });
    group.finish();
}

/// Benchmark spring layout on grids of growing size
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring_layout");
    group.sample_size(10);

    let config = SpringLayoutConfig {
        seed: Some(1),
        ..Default::default()
    };
    for side in [10, 20].iter() {
        let graph = grid_graph(*side, *side).unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(side * side), side, |b, _| {
            b.iter(|| black_box(spring_layout(&graph, &config).map(|l| l.len()).unwrap_or(0)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_removal,
    bench_dijkstra,
    bench_all_pairs,
    bench_structure,
    bench_layout
);
criterion_main!(benches);
