//! Iteration sets and tile region bookkeeping.

use crate::tile::TileRegion;

/// A named, sized domain of mesh entities (nodes, edges, cells, ...).
///
/// Loops iterate over sets; indirection maps connect one set's elements to
/// another's. A subset (e.g. "boundary edges") can be iterated by a loop but
/// can never anchor the tiling as a seed loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    /// Identifier name of the set. Unique within one arena.
    pub name: String,
    /// Number of elements in the set.
    pub size: u32,
    /// Whether this set is a subset of another set's iteration space.
    pub is_subset: bool,
}

impl Set {
    /// Create a set with `size` elements.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
            is_subset: false,
        }
    }

    /// Create a subset. Subsets cannot be used as a seed loop's set.
    pub fn subset(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
            is_subset: true,
        }
    }
}

/// Region split of a tile list, in tile-index order.
///
/// The partitioner lays tiles out as `core` locally-owned tiles, then
/// `exec_halo` tiles whose execution needs neighbour-rank data, then a
/// trailing run of `non_exec_halo` tiles that are received but never
/// executed locally. The coloring engine relies on this ordering: the
/// non-exec run is deferred and colored after the core visit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileRegions {
    /// Number of locally-owned tiles.
    pub core: usize,
    /// Number of exec-halo tiles, following the core run.
    pub exec_halo: usize,
    /// Number of non-exec-halo tiles, trailing the tile list.
    pub non_exec_halo: usize,
}

impl TileRegions {
    /// Regions for a purely local partition: every tile is core.
    pub fn local_only(n_tiles: usize) -> Self {
        Self {
            core: n_tiles,
            exec_halo: 0,
            non_exec_halo: 0,
        }
    }

    /// Total number of tiles across all three regions.
    pub fn total(&self) -> usize {
        self.core + self.exec_halo + self.non_exec_halo
    }

    /// Region of the tile at `index` in tile-list order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.total()`.
    pub fn region_of(&self, index: usize) -> TileRegion {
        assert!(
            index < self.total(),
            "tile index {index} out of range for {} tiles",
            self.total()
        );
        if index < self.core {
            TileRegion::Local
        } else if index < self.core + self.exec_halo {
            TileRegion::ExecHalo
        } else {
            TileRegion::NonExecHalo
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_flag() {
        assert!(!Set::new("nodes", 10).is_subset);
        assert!(Set::subset("bnd_nodes", 4).is_subset);
    }

    #[test]
    fn region_of_splits_in_order() {
        let r = TileRegions {
            core: 2,
            exec_halo: 1,
            non_exec_halo: 1,
        };
        assert_eq!(r.total(), 4);
        assert_eq!(r.region_of(0), TileRegion::Local);
        assert_eq!(r.region_of(1), TileRegion::Local);
        assert_eq!(r.region_of(2), TileRegion::ExecHalo);
        assert_eq!(r.region_of(3), TileRegion::NonExecHalo);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn region_of_rejects_out_of_range() {
        TileRegions::local_only(2).region_of(2);
    }
}
