//! Inspector orchestration for the Quilt sparse-tiling scheduler.
//!
//! The [`Inspector`] precomputes a parallel execution schedule for a chain
//! of indirect mesh loops: it partitions the iteration space of a chosen
//! seed loop into tiles, colors the tiles so that same-colored tiles touch
//! no common data, and projects the tiling onto the remaining loops of the
//! chain — forward then backward — through externally supplied projection
//! primitives. The result is in-memory scheduling metadata (tile and color
//! assignments) consumed by a downstream executor; the inspector never
//! executes a loop body itself.
//!
//! The inspector is a single-threaded, synchronous preprocessing stage.
//! Its output is what *enables* a parallel executor to run same-colored
//! tiles without locks and to place a barrier or halo exchange between
//! color classes.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod inspector;
mod loops;
mod metrics;
mod partition;
mod project;
mod summary;

pub use config::{ConfigError, InspectorConfig, Strategy};
pub use error::InspectorError;
pub use inspector::{Inspector, Phase, RunReport, Schedule};
pub use loops::Loop;
pub use metrics::InspectionMetrics;
pub use partition::{Partition, PartitionError, Partitioner};
pub use project::{Projection, ProjectionError, Projector, TilingSnapshot};
pub use summary::Verbosity;
