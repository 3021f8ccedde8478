//! Indirection-map algebra for the Quilt sparse-tiling inspector.
//!
//! An indirection map is a relation connecting one iteration set's elements
//! to zero or more elements of another set — the data-access structure of an
//! unstructured-mesh loop. This crate provides:
//!
//! - [`Map`]: a validated map with dense (fixed-arity) or ragged (CSR)
//!   storage, chosen once at construction;
//! - [`Map::invert`]: O(entries) construction of the reverse relation;
//! - [`MeshArena`]: an id-addressed owner for sets and maps, so that a set
//!   shared by several maps and loops is referenced by copyable [`SetId`]s
//!   instead of aliased pointers.
//!
//! [`SetId`]: quilt_core::SetId

#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
mod error;
mod invert;
mod map;

pub use arena::MeshArena;
pub use error::MapError;
pub use invert::Inverted;
pub use map::{Map, MapStorage, OFF_RANK};
