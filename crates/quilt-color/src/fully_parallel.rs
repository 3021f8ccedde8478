//! Fully-parallel coloring: one color per region.

use quilt_core::{Color, Tile, TileRegion};
use quilt_map::Map;

use crate::apply::apply;
use crate::policy::Coloring;

/// Assign color 0 to every local tile, 1 to every exec-halo tile, and 2 to
/// every non-exec-halo tile.
///
/// Valid only when the caller has externally proven that no two tiles of
/// the same region conflict. Halo tiles are placed in strictly later
/// colors because their correct execution may depend on data that only
/// arrives with a halo exchange.
pub fn color_fully_parallel(iter2tile: &Map, tiles: &mut [Tile]) -> Coloring {
    assert_eq!(
        tiles.len() as u32,
        iter2tile.out_size(),
        "tile list and iter2tile target set disagree"
    );

    let tile_colors: Vec<Color> = tiles
        .iter()
        .map(|t| match t.region() {
            TileRegion::Local => Color(0),
            TileRegion::ExecHalo => Color(1),
            TileRegion::NonExecHalo => Color(2),
        })
        .collect();
    let n_colors = tile_colors.iter().map(|c| c.0 + 1).max().unwrap_or(0);

    let tile2iter = iter2tile.invert();
    let iter2color = apply(&tile_colors, &tile2iter.map, tiles);

    Coloring {
        tile_colors,
        iter2color,
        n_colors,
        passes: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_core::{SetId, TileRegions};

    #[test]
    fn three_colors_when_all_regions_present() {
        let regions = TileRegions {
            core: 2,
            exec_halo: 1,
            non_exec_halo: 1,
        };
        let m = Map::dense("i2t", SetId(0), 4, SetId(1), 4, vec![0, 1, 2, 3]).unwrap();
        let mut tiles: Vec<Tile> = (0..4).map(|i| Tile::new(1, regions.region_of(i))).collect();
        let c = color_fully_parallel(&m, &mut tiles);

        assert_eq!(c.n_colors, 3);
        assert_eq!(
            c.tile_colors,
            [Color(0), Color(0), Color(1), Color(2)]
        );
        // local < exec halo < non-exec halo
        assert!(tiles[0].color() < tiles[2].color());
        assert!(tiles[2].color() < tiles[3].color());
    }

    #[test]
    fn all_local_collapses_to_one_color() {
        let m = Map::dense("i2t", SetId(0), 3, SetId(1), 3, vec![0, 1, 2]).unwrap();
        let mut tiles = vec![Tile::new(1, TileRegion::Local); 3];
        let c = color_fully_parallel(&m, &mut tiles);
        assert_eq!(c.n_colors, 1);
        assert_eq!(c.iter2color, vec![0, 0, 0]);
    }
}
