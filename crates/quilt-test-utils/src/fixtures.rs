//! Reference partitioner and projector fixtures.

use quilt_core::TileRegions;
use quilt_inspector::{
    Loop, Partition, PartitionError, Partitioner, Projection, ProjectionError, Projector,
    TilingSnapshot,
};
use quilt_map::MeshArena;

/// Partitions an iteration set into contiguous blocks of `avg_tile_size`
/// iterations: iteration `i` lands in tile `i / avg_tile_size`.
///
/// The simplest implementation of the partitioning contract — total,
/// single-valued, roughly `size / avg_tile_size` tiles. By default every
/// tile is core; [`with_regions`](BlockPartitioner::with_regions) lets a
/// test declare a trailing halo split instead.
#[derive(Clone, Debug, Default)]
pub struct BlockPartitioner {
    regions: Option<TileRegions>,
}

impl BlockPartitioner {
    /// A partitioner producing all-core tiles.
    pub fn new() -> Self {
        Self::default()
    }

    /// A partitioner that labels the produced tiles with `regions`.
    ///
    /// The caller vouches that the trailing tiles really are halo tiles;
    /// `regions.total()` must match the tile count the block split yields.
    pub fn with_regions(regions: TileRegions) -> Self {
        Self {
            regions: Some(regions),
        }
    }
}

impl Partitioner for BlockPartitioner {
    fn partition(
        &self,
        seed_loop: &Loop,
        avg_tile_size: u32,
        arena: &MeshArena,
    ) -> Result<Partition, PartitionError> {
        if avg_tile_size == 0 {
            return Err(PartitionError::Failed {
                reason: "average tile size must be at least 1".to_owned(),
            });
        }
        let size = arena.set(seed_loop.set).size;
        let n_tiles = size.div_ceil(avg_tile_size) as usize;
        let iter2tile: Vec<i32> = (0..size).map(|i| (i / avg_tile_size) as i32).collect();
        let regions = match self.regions {
            Some(r) if r.total() == n_tiles => r,
            Some(r) => {
                return Err(PartitionError::Failed {
                    reason: format!(
                        "declared regions cover {} tiles but the split yields {n_tiles}",
                        r.total()
                    ),
                });
            }
            None => TileRegions::local_only(n_tiles),
        };
        Ok(Partition {
            iter2tile,
            n_tiles,
            regions,
        })
    }
}

/// Projects a tiling across loops that iterate over the same set.
///
/// `project_*` records the previously tiled loop's snapshot under its set
/// name; `tile_*` looks the current loop's set up in the projection and
/// reuses the recorded tiling verbatim. Enough to exercise the inspector's
/// forward and backward walks over same-set chains; loops over a set the
/// walk has not reached fail with
/// [`ProjectionError::MissingProjection`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ChainProjector;

impl ChainProjector {
    fn record(
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
    ) -> Result<(), ProjectionError> {
        working.insert(prev.clone());
        if base.get(&prev.set_name).is_none() {
            base.insert(prev.clone());
        }
        Ok(())
    }

    fn derive(
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError> {
        let set = arena.set(cur_loop.set);
        projection
            .get(&set.name)
            .cloned()
            .ok_or_else(|| ProjectionError::MissingProjection {
                set_name: set.name.clone(),
            })
    }
}

impl Projector for ChainProjector {
    fn project_forward(
        &self,
        _prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        _arena: &MeshArena,
    ) -> Result<(), ProjectionError> {
        Self::record(prev, working, base)
    }

    fn tile_forward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError> {
        Self::derive(cur_loop, projection, arena)
    }

    fn project_backward(
        &self,
        _prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        _arena: &MeshArena,
    ) -> Result<(), ProjectionError> {
        Self::record(prev, working, base)
    }

    fn tile_backward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError> {
        Self::derive(cur_loop, projection, arena)
    }
}

/// A projector that fails deterministically when asked to tile the loop
/// named `fail_on`, delegating everything else to [`ChainProjector`].
///
/// For exercising mid-chain failure reporting.
#[derive(Clone, Debug)]
pub struct FailingProjector {
    inner: ChainProjector,
    fail_on: String,
}

impl FailingProjector {
    /// Fail when tiling the loop named `fail_on`.
    pub fn new(fail_on: impl Into<String>) -> Self {
        Self {
            inner: ChainProjector,
            fail_on: fail_on.into(),
        }
    }

    fn check(&self, cur_loop: &Loop) -> Result<(), ProjectionError> {
        if cur_loop.name == self.fail_on {
            return Err(ProjectionError::Failed {
                reason: format!("injected failure at loop '{}'", cur_loop.name),
            });
        }
        Ok(())
    }
}

impl Projector for FailingProjector {
    fn project_forward(
        &self,
        prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        arena: &MeshArena,
    ) -> Result<(), ProjectionError> {
        self.inner
            .project_forward(prev_loop, prev, working, base, arena)
    }

    fn tile_forward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError> {
        self.check(cur_loop)?;
        self.inner.tile_forward(cur_loop, projection, arena)
    }

    fn project_backward(
        &self,
        prev_loop: &Loop,
        prev: &TilingSnapshot,
        working: &mut Projection,
        base: &mut Projection,
        arena: &MeshArena,
    ) -> Result<(), ProjectionError> {
        self.inner
            .project_backward(prev_loop, prev, working, base, arena)
    }

    fn tile_backward(
        &self,
        cur_loop: &Loop,
        projection: &Projection,
        arena: &MeshArena,
    ) -> Result<TilingSnapshot, ProjectionError> {
        self.check(cur_loop)?;
        self.inner.tile_backward(cur_loop, projection, arena)
    }
}
