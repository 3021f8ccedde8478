//! Error types for map construction and the mesh arena.

use std::error::Error;
use std::fmt;

use quilt_core::SetId;

/// Errors from map construction or arena registration.
///
/// Every malformed-data case is caught here, at construction time; the
/// algebra itself ([`invert`](crate::Map::invert),
/// [`offsets_of`](crate::Map::offsets_of)) operates on validated maps only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    /// An entry names a target outside `[0, out_size)` and is not the
    /// off-rank sentinel.
    TargetOutOfRange {
        /// Name of the offending map.
        map: String,
        /// Position of the bad entry in the value sequence.
        index: usize,
        /// The bad entry.
        value: i32,
        /// Size of the target set.
        out_size: u32,
    },
    /// A dense map's entry count is not a multiple of its source set size.
    LengthNotMultiple {
        /// Name of the offending map.
        map: String,
        /// Entry count.
        len: usize,
        /// Source set size.
        in_size: u32,
    },
    /// A ragged map's offset table is not `in_size + 1` long.
    OffsetLengthMismatch {
        /// Name of the offending map.
        map: String,
        /// Offset table length.
        len: usize,
        /// Source set size.
        in_size: u32,
    },
    /// A ragged map's offsets decrease, or do not start at zero.
    OffsetsNotMonotonic {
        /// Name of the offending map.
        map: String,
        /// First offending offset index.
        index: usize,
    },
    /// A ragged map's final offset disagrees with its entry count.
    OffsetTotalMismatch {
        /// Name of the offending map.
        map: String,
        /// `offsets[in_size]`.
        expected: u32,
        /// Actual entry count.
        len: usize,
    },
    /// A map references a set id the arena does not hold.
    UnknownSet {
        /// The unknown id.
        id: SetId,
    },
    /// Two sets were registered under the same name.
    DuplicateSetName {
        /// The colliding name.
        name: String,
    },
    /// Two maps were registered under the same name.
    DuplicateMapName {
        /// The colliding name.
        name: String,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetOutOfRange {
                map,
                index,
                value,
                out_size,
            } => write!(
                f,
                "map '{map}' entry {index} is {value}, valid targets are -1 or [0, {out_size})"
            ),
            Self::LengthNotMultiple { map, len, in_size } => write!(
                f,
                "map '{map}' has {len} entries, not a multiple of source size {in_size}"
            ),
            Self::OffsetLengthMismatch { map, len, in_size } => write!(
                f,
                "map '{map}' offset table has {len} entries, expected {}",
                in_size + 1
            ),
            Self::OffsetsNotMonotonic { map, index } => {
                write!(f, "map '{map}' offsets not monotonic at index {index}")
            }
            Self::OffsetTotalMismatch { map, expected, len } => write!(
                f,
                "map '{map}' final offset {expected} disagrees with {len} entries"
            ),
            Self::UnknownSet { id } => write!(f, "set id {id} is not in this arena"),
            Self::DuplicateSetName { name } => {
                write!(f, "a set named '{name}' is already registered")
            }
            Self::DuplicateMapName { name } => {
                write!(f, "a map named '{name}' is already registered")
            }
        }
    }
}

impl Error for MapError {}
