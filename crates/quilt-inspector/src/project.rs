//! The external projection seam.
//!
//! Projection propagates a tiling decision from one loop of the chain to
//! an adjacent loop through the connecting indirection maps. The concrete
//! algorithm lives outside this crate; the inspector drives it through the
//! [`Projector`] trait and requires only that the returned tiling be total
//! over the target loop's iteration space.

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use quilt_map::MeshArena;

use crate::loops::Loop;

/// A tiling (and coloring) of one iteration set, as carried between
/// projection steps.
///
/// Snapshots are deep copies: the forward and backward passes each mutate
/// their own working snapshots while the seed loop's original survives for
/// the other direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilingSnapshot {
    /// Name of the tiled iteration set.
    pub set_name: String,
    /// Size of the tiled iteration set.
    pub it_set_size: u32,
    /// Tile id per iteration, total over the set.
    pub iter2tile: Vec<i32>,
    /// Color id per iteration, total over the set.
    pub iter2color: Vec<i32>,
}

impl TilingSnapshot {
    /// Bundle a tiling record for `set_name`.
    pub fn new(
        set_name: impl Into<String>,
        it_set_size: u32,
        iter2tile: Vec<i32>,
        iter2color: Vec<i32>,
    ) -> Self {
        Self {
            set_name: set_name.into(),
            it_set_size,
            iter2tile,
            iter2color,
        }
    }
}

/// A set of per-set tiling records accumulated while walking the chain,
/// keyed by set name.
///
/// Insertion order is preserved, keeping diagnostics and any iteration
/// over the projection deterministic.
#[derive(Clone, Debug, Default)]
pub struct Projection {
    entries: IndexMap<String, TilingSnapshot>,
}

impl Projection {
    /// An empty projection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the record for `snapshot.set_name`.
    pub fn insert(&mut self, snapshot: TilingSnapshot) {
        self.entries.insert(snapshot.set_name.clone(), snapshot);
    }

    /// The record for `set_name`, if the walk has produced one.
    pub fn get(&self, set_name: &str) -> Option<&TilingSnapshot> {
        self.entries.get(set_name)
    }

    /// Number of recorded sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the walk has recorded nothing yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded set names, in insertion order.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// The projection primitives, supplied by the embedding application.
///
/// `project_*` folds the previously tiled loop's snapshot into the working
/// projection (and the base projection, which tracks the seed side of the
/// walk); `tile_*` derives the next loop's tiling from the accumulated
/// projection. The backward methods mirror the forward ones with the
/// dependency direction reversed.
pub trait Projector {
    /// Fold `prev`'s tiling into the projections, walking forward.
    fn project_forward(
        &self,
        prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        arena: &MeshArena,
    ) -> Result<(), ProjectionError>;

    /// Tile `cur_loop` from the accumulated forward projection.
    fn tile_forward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError>;

    /// Fold `prev`'s tiling into the projections, walking backward.
    fn project_backward(
        &self,
        prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        arena: &MeshArena,
    ) -> Result<(), ProjectionError>;

    /// Tile `cur_loop` from the accumulated backward projection.
    fn tile_backward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError>;
}

/// Errors from an external projector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectionError {
    /// The projection holds no record for the set a loop iterates over.
    MissingProjection {
        /// The uncovered set name.
        set_name: String,
    },
    /// The projector could not derive a tiling.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProjection { set_name } => {
                write!(f, "no projection covers set '{set_name}'")
            }
            Self::Failed { reason } => write!(f, "projection failed: {reason}"),
        }
    }
}

impl Error for ProjectionError {}
