//! Sequential coloring: the fully-serialized correctness baseline.

use quilt_core::{Color, Tile};
use quilt_map::Map;

use crate::apply::apply;
use crate::policy::Coloring;

/// Assign increasing colors in tile-arrival order: `color[i] = i`.
///
/// The number of colors equals the number of tiles, so execution is fully
/// serialized. Halo tiles trail the tile list and therefore get the
/// maximum colors, keeping them after all local work.
pub fn color_sequential(iter2tile: &Map, tiles: &mut [Tile]) -> Coloring {
    let n_tiles = tiles.len();
    assert_eq!(
        n_tiles as u32,
        iter2tile.out_size(),
        "tile list and iter2tile target set disagree"
    );

    let tile_colors: Vec<Color> = (0..n_tiles as u32).map(Color).collect();
    let tile2iter = iter2tile.invert();
    let iter2color = apply(&tile_colors, &tile2iter.map, tiles);

    Coloring {
        tile_colors,
        iter2color,
        n_colors: n_tiles as u32,
        passes: 1,
    }
}
