//! Test utilities and fixtures for Quilt development.
//!
//! Reference implementations of the inspector's external seams — a block
//! partitioner and a same-set chain projector — plus small mesh builders,
//! for exercising the orchestration without a real mesh partitioning or
//! projection library.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;
mod meshes;

pub use fixtures::{BlockPartitioner, ChainProjector, FailingProjector};
pub use meshes::{identity_values, ring_edge2node, ring_node2edge};
