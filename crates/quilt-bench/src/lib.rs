//! Benchmarks for the Quilt sparse-tiling inspector.
//!
//! Run with `cargo bench -p quilt-bench`. The benches live under
//! `benches/`; this library is intentionally empty.
