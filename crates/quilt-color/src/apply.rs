//! Broadcasting per-tile colors onto the iteration space.

use quilt_core::{Color, Tile};
use quilt_map::{Map, OFF_RANK};

/// Write each tile's color and broadcast it to every iteration the tile
/// owns, via the inverted `tile2iter` offset ranges.
///
/// Returns the `iter2color` value sequence, total over the seed iteration
/// space: `iter2tile` is total, so every iteration appears in exactly one
/// tile's range and receives exactly one color. A tile owning zero
/// iterations still has its color recorded (its range is empty).
pub(crate) fn apply(tile_colors: &[Color], tile2iter: &Map, tiles: &mut [Tile]) -> Vec<i32> {
    debug_assert_eq!(tile_colors.len(), tiles.len());
    let it_set_size = tile2iter.out_size() as usize;
    let mut iter2color = vec![OFF_RANK; it_set_size];
    for (i, tile) in tiles.iter_mut().enumerate() {
        let color = tile_colors[i];
        let (off, len) = tile2iter.offsets_of(i);
        for &it in &tile2iter.values()[off..off + len] {
            iter2color[it as usize] = color.0 as i32;
        }
        tile.set_color(color);
    }
    debug_assert!(
        iter2color.iter().all(|&c| c != OFF_RANK),
        "iter2color not total: some iteration received no color"
    );
    iter2color
}
