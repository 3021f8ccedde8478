//! Error types for inspector orchestration.

use std::error::Error;
use std::fmt;

use quilt_core::AssignError;
use quilt_map::MapError;

use crate::inspector::Phase;
use crate::partition::PartitionError;
use crate::project::ProjectionError;

/// Errors from [`Inspector::run`](crate::Inspector::run) and
/// [`Inspector::into_schedule`](crate::Inspector::into_schedule).
///
/// The precondition variants (`NoLoops`, `SeedOutOfRange`, `SeedIsSubset`,
/// `AlreadyRun`) are programmer errors in chain construction; everything
/// else reports a collaborator failure with the chain state it left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InspectorError {
    /// `run` was called before any loop was registered.
    NoLoops,
    /// `run` was called twice; an inspector tiles one chain once.
    AlreadyRun,
    /// The seed index does not name a registered loop.
    SeedOutOfRange {
        /// The requested seed index.
        seed: usize,
        /// Number of registered loops.
        n_loops: usize,
    },
    /// The seed loop iterates over a subset, which cannot anchor a tiling.
    SeedIsSubset {
        /// Name of the subset.
        name: String,
    },
    /// The partitioner's output violates its contract.
    InvalidPartition {
        /// What was wrong with it.
        reason: String,
    },
    /// The external partitioner failed.
    Partition(PartitionError),
    /// Registering a derived set or map failed.
    Map(MapError),
    /// Distributing iterations over tiles failed.
    Assign(AssignError),
    /// The coloring engine failed.
    Coloring(quilt_color::ColoringError),
    /// A projection step failed mid-chain. Loops in `tiled` were
    /// successfully tiled; the loop at `failed` and every loop beyond it in
    /// the failing direction were not. The chain must be treated as not
    /// fully tiled, never as a complete-looking result.
    ChainIncomplete {
        /// Chain positions tiled before the failure, in tiling order.
        tiled: Vec<usize>,
        /// Chain position of the loop that failed to tile.
        failed: usize,
        /// The underlying projection failure.
        source: ProjectionError,
    },
    /// A schedule was requested before the chain was fully tiled.
    ScheduleUnavailable {
        /// The phase the inspection stopped in.
        phase: Phase,
    },
}

impl fmt::Display for InspectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLoops => write!(f, "no loops registered"),
            Self::AlreadyRun => write!(f, "inspector has already tiled its chain"),
            Self::SeedOutOfRange { seed, n_loops } => {
                write!(f, "seed {seed} out of range: {n_loops} loops registered")
            }
            Self::SeedIsSubset { name } => {
                write!(f, "seed loop iterates over subset '{name}'")
            }
            Self::InvalidPartition { reason } => write!(f, "invalid partition: {reason}"),
            Self::Partition(e) => write!(f, "{e}"),
            Self::Map(e) => write!(f, "{e}"),
            Self::Assign(e) => write!(f, "{e}"),
            Self::Coloring(e) => write!(f, "{e}"),
            Self::ChainIncomplete {
                tiled,
                failed,
                source,
            } => write!(
                f,
                "chain not fully tiled: loop {failed} failed ({source}); tiled loops: {tiled:?}"
            ),
            Self::ScheduleUnavailable { phase } => {
                write!(f, "no schedule available: inspection stopped in phase {phase}")
            }
        }
    }
}

impl Error for InspectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Partition(e) => Some(e),
            Self::Map(e) => Some(e),
            Self::Assign(e) => Some(e),
            Self::Coloring(e) => Some(e),
            Self::ChainIncomplete { source, .. } => Some(source),
            _ => None,
        }
    }
}
