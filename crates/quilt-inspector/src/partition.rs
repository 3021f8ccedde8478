//! The external partitioner seam.

use std::error::Error;
use std::fmt;

use quilt_core::TileRegions;
use quilt_map::MeshArena;

use crate::loops::Loop;

/// Result of partitioning a seed loop's iteration space.
#[derive(Clone, Debug)]
pub struct Partition {
    /// Tile id per iteration; must be total over the loop's set (no
    /// off-rank sentinels, every id in `[0, n_tiles)`).
    pub iter2tile: Vec<i32>,
    /// Number of tiles produced.
    pub n_tiles: usize,
    /// Region split of the produced tile list, in tile order.
    pub regions: TileRegions,
}

/// The mesh partitioning heuristic, supplied by the embedding application.
///
/// The inspector requires only the contract stated on [`Partition`]:
/// a total, single-valued iteration→tile assignment producing roughly
/// `set.size / avg_tile_size` tiles laid out core-first.
pub trait Partitioner {
    /// Partition `seed_loop`'s iteration space into tiles of roughly
    /// `avg_tile_size` iterations.
    fn partition(
        &self,
        seed_loop: &Loop,
        avg_tile_size: u32,
        arena: &MeshArena,
    ) -> Result<Partition, PartitionError>;
}

/// Errors from an external partitioner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// The partitioner could not produce a tiling.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => write!(f, "partitioning failed: {reason}"),
        }
    }
}

impl Error for PartitionError {}
