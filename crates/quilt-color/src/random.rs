//! Random coloring: sequential with a permuted core ordering.

use quilt_core::{Color, Tile, TileRegions};
use quilt_map::Map;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::apply::apply;
use crate::policy::Coloring;

/// Assign one color per tile, permuting the core tiles' colors uniformly
/// at random.
///
/// Identical to [`color_sequential`](crate::color_sequential) except that
/// the leading `regions.core` color ids are shuffled with a `ChaCha8Rng`
/// seeded from `seed`, so equal seeds reproduce equal colorings. Halo
/// tiles keep their natural trailing positions and therefore still run
/// after all core work.
pub fn color_random(
    iter2tile: &Map,
    tiles: &mut [Tile],
    regions: &TileRegions,
    seed: u64,
) -> Coloring {
    let n_tiles = tiles.len();
    assert_eq!(
        n_tiles as u32,
        iter2tile.out_size(),
        "tile list and iter2tile target set disagree"
    );
    assert_eq!(
        regions.total(),
        n_tiles,
        "tile regions and tile list disagree"
    );

    let mut tile_colors: Vec<Color> = (0..n_tiles as u32).map(Color).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tile_colors[..regions.core].shuffle(&mut rng);

    let tile2iter = iter2tile.invert();
    let iter2color = apply(&tile_colors, &tile2iter.map, tiles);

    Coloring {
        tile_colors,
        iter2color,
        n_colors: n_tiles as u32,
        passes: 1,
    }
}
