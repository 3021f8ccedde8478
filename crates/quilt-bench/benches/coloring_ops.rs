//! Criterion micro-benchmarks for the coloring policies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quilt_color::{color_adjacency_safe, color_sequential, ColoringConfig};
use quilt_core::{ConflictTracker, SetId, Tile, TileRegion, TileRegions};
use quilt_map::Map;
use quilt_test_utils::ring_edge2node;

fn ring_inputs(n: u32, tile_size: u32) -> (Map, Map, usize) {
    let n_tiles = n.div_ceil(tile_size) as usize;
    let iter2tile = Map::dense(
        "iter2tile",
        SetId(0),
        n,
        SetId(1),
        n_tiles as u32,
        (0..n).map(|i| (i / tile_size) as i32).collect(),
    )
    .unwrap();
    let seed_map = Map::dense("edge2node", SetId(0), n, SetId(2), n, ring_edge2node(n)).unwrap();
    (iter2tile, seed_map, n_tiles)
}

/// Benchmark: adjacency-safe coloring of 100 tiles over a 10K-edge ring.
fn bench_adjacency_ring_10k(c: &mut Criterion) {
    let (iter2tile, seed_map, n_tiles) = ring_inputs(10_000, 100);
    let tracker = ConflictTracker::new(n_tiles);
    let regions = TileRegions::local_only(n_tiles);
    let config = ColoringConfig::default();

    c.bench_function("adjacency_ring_10k", |b| {
        b.iter(|| {
            let mut tiles = vec![Tile::new(1, TileRegion::Local); n_tiles];
            let coloring = color_adjacency_safe(
                &iter2tile,
                &mut tiles,
                &regions,
                &seed_map,
                &tracker,
                &config,
            )
            .unwrap();
            black_box(coloring.n_colors);
        });
    });
}

/// Benchmark: the sequential baseline over the same mesh.
fn bench_sequential_ring_10k(c: &mut Criterion) {
    let (iter2tile, _, n_tiles) = ring_inputs(10_000, 100);

    c.bench_function("sequential_ring_10k", |b| {
        b.iter(|| {
            let mut tiles = vec![Tile::new(1, TileRegion::Local); n_tiles];
            let coloring = color_sequential(&iter2tile, &mut tiles);
            black_box(coloring.n_colors);
        });
    });
}

criterion_group!(benches, bench_adjacency_ring_10k, bench_sequential_ring_10k);
criterion_main!(benches);
