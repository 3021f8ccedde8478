//! Core types for the Quilt sparse-tiling inspector.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental vocabulary shared by the whole workspace: typed identifiers,
//! iteration sets, access descriptors, tiles, and the conflict tracker the
//! coloring engine consumes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod id;
mod set;
mod tile;
mod tracker;

pub use descriptor::{AccessDescriptor, AccessMode, AccessTarget};
pub use error::AssignError;
pub use id::{Color, MapId, SetId};
pub use set::{Set, TileRegions};
pub use tile::{assign_loop, Tile, TileRegion};
pub use tracker::ConflictTracker;
