//! Policy selection and the coloring result.

use quilt_core::{Color, ConflictTracker, Tile, TileRegions};
use quilt_map::Map;

use crate::adjacency::color_adjacency_safe;
use crate::config::ColoringConfig;
use crate::error::ColoringError;
use crate::fully_parallel::color_fully_parallel;
use crate::random::color_random;
use crate::sequential::color_sequential;

/// The available coloring policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// One color per tile, in tile-arrival order.
    Sequential,
    /// One color per tile, core positions permuted by a seeded RNG.
    Random,
    /// One color per region; requires externally-proven conflict freedom.
    FullyParallel,
    /// Batched bitmask greedy coloring under a seed-map adjacency oracle.
    AdjacencySafe,
}

/// A finished coloring: per-tile colors, the broadcast `iter2color`
/// sequence, and run statistics.
#[derive(Clone, Debug)]
pub struct Coloring {
    /// Color of each tile, in tile order.
    pub tile_colors: Vec<Color>,
    /// Color of each seed-loop iteration; total over the iteration space.
    pub iter2color: Vec<i32>,
    /// Number of distinct color classes.
    pub n_colors: u32,
    /// Number of adjacency-safe passes taken (1 for the other policies).
    pub passes: u32,
}

/// Run the selected policy.
///
/// `seed_map` and `tracker` are only consulted by
/// [`Policy::AdjacencySafe`]; a missing seed map is an error there, while a
/// missing tracker simply contributes no extra conflicts.
pub fn color_tiles(
    policy: Policy,
    iter2tile: &Map,
    tiles: &mut [Tile],
    regions: &TileRegions,
    seed_map: Option<&Map>,
    tracker: Option<&ConflictTracker>,
    config: &ColoringConfig,
) -> Result<Coloring, ColoringError> {
    match policy {
        Policy::Sequential => Ok(color_sequential(iter2tile, tiles)),
        Policy::Random => Ok(color_random(iter2tile, tiles, regions, config.seed)),
        Policy::FullyParallel => Ok(color_fully_parallel(iter2tile, tiles)),
        Policy::AdjacencySafe => {
            let seed_map = seed_map.ok_or(ColoringError::MissingSeedMap)?;
            let empty;
            let tracker = match tracker {
                Some(t) => t,
                None => {
                    empty = ConflictTracker::default();
                    &empty
                }
            };
            color_adjacency_safe(iter2tile, tiles, regions, seed_map, tracker, config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_core::{SetId, TileRegion};

    #[test]
    fn adjacency_safe_requires_a_seed_map() {
        let iter2tile = Map::dense("i2t", SetId(0), 2, SetId(1), 2, vec![0, 1]).unwrap();
        let mut tiles = vec![Tile::new(1, TileRegion::Local); 2];
        let err = color_tiles(
            Policy::AdjacencySafe,
            &iter2tile,
            &mut tiles,
            &TileRegions::local_only(2),
            None,
            None,
            &ColoringConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ColoringError::MissingSeedMap);
    }
}
