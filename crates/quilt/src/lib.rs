//! Quilt: a sparse-tiling inspector for chains of indirect mesh loops.
//!
//! Quilt precomputes a parallel execution schedule for a loop chain over an
//! unstructured mesh: it partitions a chosen seed loop's iteration space
//! into tiles, colors the tiles so that same-colored tiles touch no common
//! data, and projects the tiling across the rest of the chain. A
//! downstream executor then runs same-colored tiles concurrently and
//! places a barrier or halo exchange between color classes — many loops,
//! a handful of synchronization points.
//!
//! This is the top-level facade crate re-exporting the public API from the
//! Quilt sub-crates. For most users, adding `quilt` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quilt::prelude::*;
//!
//! // The mesh partitioning heuristic is supplied by the application;
//! // contiguous blocks are enough here.
//! struct Blocks;
//! impl Partitioner for Blocks {
//!     fn partition(
//!         &self,
//!         seed_loop: &Loop,
//!         avg_tile_size: u32,
//!         arena: &MeshArena,
//!     ) -> Result<Partition, PartitionError> {
//!         let size = arena.set(seed_loop.set).size;
//!         let n_tiles = size.div_ceil(avg_tile_size) as usize;
//!         Ok(Partition {
//!             iter2tile: (0..size).map(|i| (i / avg_tile_size) as i32).collect(),
//!             n_tiles,
//!             regions: TileRegions::local_only(n_tiles),
//!         })
//!     }
//! }
//! # struct NoProjection;
//! # impl Projector for NoProjection {
//! #     fn project_forward(&self, _: &Loop, _: &TilingSnapshot, _: &mut Projection, _: &mut Projection, _: &MeshArena) -> Result<(), ProjectionError> { Ok(()) }
//! #     fn tile_forward(&self, l: &Loop, _: &Projection, _: &MeshArena) -> Result<TilingSnapshot, ProjectionError> { Err(ProjectionError::MissingProjection { set_name: l.name.clone() }) }
//! #     fn project_backward(&self, _: &Loop, _: &TilingSnapshot, _: &mut Projection, _: &mut Projection, _: &MeshArena) -> Result<(), ProjectionError> { Ok(()) }
//! #     fn tile_backward(&self, l: &Loop, _: &Projection, _: &MeshArena) -> Result<TilingSnapshot, ProjectionError> { Err(ProjectionError::MissingProjection { set_name: l.name.clone() }) }
//! # }
//!
//! // Build a one-loop chain over six cells and inspect it.
//! let mut inspector = Inspector::new(InspectorConfig::new(3, Strategy::Sequential)).unwrap();
//! let cells = inspector.arena_mut().add_set(Set::new("cells", 6)).unwrap();
//! inspector.add_loop(
//!     "update",
//!     cells,
//!     vec![AccessDescriptor::direct(AccessMode::ReadWrite)],
//! );
//!
//! let report = inspector.run(0, &Blocks, &NoProjection, None).unwrap();
//! assert_eq!(report.metrics.n_tiles, 2);
//! assert_eq!(inspector.iter2tile().unwrap().values(), &[0, 0, 0, 1, 1, 1]);
//! assert_eq!(inspector.iter2color().unwrap().values(), &[0, 0, 0, 1, 1, 1]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quilt-core` | IDs, sets, tiles, descriptors, conflict tracker |
//! | [`map`] | `quilt-map` | Indirection maps, inversion, the mesh arena |
//! | [`color`] | `quilt-color` | Coloring policies and configuration |
//! | [`inspector`] | `quilt-inspector` | Orchestration, external seams, summaries |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`quilt-core`).
///
/// Sets, tiles, access descriptors, the conflict tracker, and the typed
/// identifiers everything else is addressed by.
pub use quilt_core as types;

/// Indirection-map algebra (`quilt-map`).
///
/// The [`map::Map`] type with dense/ragged storage, O(entries) inversion,
/// and the [`map::MeshArena`] entity owner.
pub use quilt_map as map;

/// Coloring policies (`quilt-color`).
///
/// Sequential, random, fully-parallel, and adjacency-safe tile coloring.
pub use quilt_color as color;

/// Inspector orchestration (`quilt-inspector`).
///
/// The [`inspector::Inspector`] state machine, the external
/// [`inspector::Partitioner`] / [`inspector::Projector`] seams, and the
/// diagnostic summary renderer.
pub use quilt_inspector as inspector;

/// Common imports for typical Quilt usage.
///
/// ```rust
/// use quilt::prelude::*;
/// ```
pub mod prelude {
    pub use quilt_color::{ColoringConfig, HaloOrdering, Policy};
    pub use quilt_core::{
        AccessDescriptor, AccessMode, AccessTarget, Color, ConflictTracker, MapId, Set, SetId,
        Tile, TileRegion, TileRegions,
    };
    pub use quilt_inspector::{
        Inspector, InspectorConfig, InspectorError, Loop, Partition, PartitionError, Partitioner,
        Phase, Projection, ProjectionError, Projector, RunReport, Schedule, Strategy,
        TilingSnapshot, Verbosity,
    };
    pub use quilt_map::{Map, MapError, MapStorage, MeshArena, OFF_RANK};
}
