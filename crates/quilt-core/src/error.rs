//! Error types for tile assignment.

use std::error::Error;
use std::fmt;

/// Errors from [`assign_loop`](crate::assign_loop).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The tile list was not sized for the requested loop slot.
    LoopOutOfRange {
        /// The requested loop index.
        loop_index: usize,
        /// How many loops the tiles were sized for.
        crossed_loops: usize,
    },
    /// An iteration was mapped to a tile id outside the tile list.
    TileOutOfRange {
        /// The iteration whose assignment is invalid.
        iteration: usize,
        /// The offending tile id (may be the `-1` sentinel).
        tile: i32,
        /// Number of tiles in the list.
        n_tiles: usize,
    },
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoopOutOfRange {
                loop_index,
                crossed_loops,
            } => write!(
                f,
                "loop index {loop_index} out of range: tiles cross {crossed_loops} loops"
            ),
            Self::TileOutOfRange {
                iteration,
                tile,
                n_tiles,
            } => write!(
                f,
                "iteration {iteration} assigned to tile {tile}, valid range is [0, {n_tiles})"
            ),
        }
    }
}

impl Error for AssignError {}
