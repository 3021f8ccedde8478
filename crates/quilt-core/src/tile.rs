//! Tiles: groups of iterations crossing the loop chain.

use indexmap::IndexMap;

use crate::error::AssignError;
use crate::id::Color;

/// The iteration-space region a tile lives in.
///
/// Halo tiles are always scheduled after local work: their correct execution
/// may depend on data that only becomes available once a halo exchange has
/// completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileRegion {
    /// Locally-owned iterations.
    Local,
    /// Iterations owned by a neighbour rank that must be executed locally.
    ExecHalo,
    /// Iterations received from a neighbour rank but never executed locally.
    NonExecHalo,
}

/// A group of iterations, one list per crossed loop, tagged with a region
/// and (after coloring) an execution color.
///
/// Invariants maintained by the inspector:
/// - for each crossed loop, a tile's iteration list is disjoint from every
///   other tile's list for that loop, and the union over all tiles is the
///   loop's full iteration set;
/// - `color` is written exactly once, by the coloring phase.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Per-loop owned iterations, indexed by loop position in the chain.
    iterations: Vec<Vec<u32>>,
    /// Per-loop localized indirection maps, keyed by global map name.
    /// Entries are global map values, so the off-partition sentinel can
    /// appear here just as it does in the source map.
    local_maps: Vec<IndexMap<String, Vec<i32>>>,
    color: Option<Color>,
    region: TileRegion,
}

impl Tile {
    /// Create an empty tile crossing `crossed_loops` loops.
    pub fn new(crossed_loops: usize, region: TileRegion) -> Self {
        Self {
            iterations: vec![Vec::new(); crossed_loops],
            local_maps: vec![IndexMap::new(); crossed_loops],
            color: None,
            region,
        }
    }

    /// Number of loops this tile crosses.
    pub fn crossed_loops(&self) -> usize {
        self.iterations.len()
    }

    /// The region this tile lives in.
    pub fn region(&self) -> TileRegion {
        self.region
    }

    /// The tile's execution color, once the coloring phase has run.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Assign the tile's color.
    ///
    /// # Panics
    ///
    /// Panics if the tile already has a color — colors are write-once.
    pub fn set_color(&mut self, color: Color) {
        assert!(
            self.color.is_none(),
            "tile color written twice (was {}, new {color})",
            self.color.unwrap(),
        );
        self.color = Some(color);
    }

    /// Iterations this tile owns for the loop at `loop_index`.
    ///
    /// # Panics
    ///
    /// Panics if `loop_index >= self.crossed_loops()`.
    pub fn iterations(&self, loop_index: usize) -> &[u32] {
        &self.iterations[loop_index]
    }

    /// Mutable iteration list for the loop at `loop_index`.
    pub fn iterations_mut(&mut self, loop_index: usize) -> &mut Vec<u32> {
        &mut self.iterations[loop_index]
    }

    /// A localized indirection map, by loop index and global map name.
    pub fn local_map(&self, loop_index: usize, map_name: &str) -> Option<&[i32]> {
        self.local_maps[loop_index]
            .get(map_name)
            .map(Vec::as_slice)
    }

    /// Mutable localized map entry, created empty on first access.
    pub fn local_map_mut(&mut self, loop_index: usize, map_name: &str) -> &mut Vec<i32> {
        self.local_maps[loop_index]
            .entry(map_name.to_owned())
            .or_default()
    }

    /// Names of the localized maps recorded for a loop, in insertion order.
    pub fn local_map_names(&self, loop_index: usize) -> impl Iterator<Item = &str> {
        self.local_maps[loop_index].keys().map(String::as_str)
    }
}

/// Distribute a loop's iteration set over tiles.
///
/// For every iteration `i` of the loop, appends `i` to
/// `tiles[iter2tile[i]]`'s list for `loop_index`. The assignment is total
/// and single-valued: each iteration lands in exactly one tile.
///
/// # Errors
///
/// - [`AssignError::LoopOutOfRange`] if the tiles were not sized for
///   `loop_index`;
/// - [`AssignError::TileOutOfRange`] if `iter2tile` names a tile id outside
///   `[0, tiles.len())` — including the `-1` off-partition sentinel, which
///   is never a valid tile assignment.
pub fn assign_loop(
    tiles: &mut [Tile],
    loop_index: usize,
    iter2tile: &[i32],
) -> Result<(), AssignError> {
    if tiles.iter().any(|t| loop_index >= t.crossed_loops()) {
        return Err(AssignError::LoopOutOfRange {
            loop_index,
            crossed_loops: tiles.first().map_or(0, Tile::crossed_loops),
        });
    }
    for (i, &t) in iter2tile.iter().enumerate() {
        let tile = usize::try_from(t).ok().filter(|&t| t < tiles.len()).ok_or(
            AssignError::TileOutOfRange {
                iteration: i,
                tile: t,
                n_tiles: tiles.len(),
            },
        )?;
        tiles[tile].iterations_mut(loop_index).push(i as u32);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_loop_appends_in_iteration_order() {
        let mut tiles = vec![Tile::new(2, TileRegion::Local); 2];
        assign_loop(&mut tiles, 0, &[0, 0, 1, 0, 1]).unwrap();
        assert_eq!(tiles[0].iterations(0), &[0, 1, 3]);
        assert_eq!(tiles[1].iterations(0), &[2, 4]);
        assert!(tiles[0].iterations(1).is_empty());
    }

    #[test]
    fn assign_loop_rejects_out_of_range_tile() {
        let mut tiles = vec![Tile::new(1, TileRegion::Local); 2];
        let err = assign_loop(&mut tiles, 0, &[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            AssignError::TileOutOfRange {
                iteration: 1,
                tile: 2,
                ..
            }
        ));
    }

    #[test]
    fn assign_loop_rejects_sentinel() {
        let mut tiles = vec![Tile::new(1, TileRegion::Local); 2];
        let err = assign_loop(&mut tiles, 0, &[-1]).unwrap_err();
        assert!(matches!(err, AssignError::TileOutOfRange { tile: -1, .. }));
    }

    #[test]
    fn assign_loop_rejects_unsized_loop_slot() {
        let mut tiles = vec![Tile::new(1, TileRegion::Local); 2];
        let err = assign_loop(&mut tiles, 1, &[0]).unwrap_err();
        assert!(matches!(err, AssignError::LoopOutOfRange { loop_index: 1, .. }));
    }

    #[test]
    #[should_panic(expected = "written twice")]
    fn color_is_write_once() {
        let mut tile = Tile::new(1, TileRegion::Local);
        tile.set_color(Color(0));
        tile.set_color(Color(1));
    }

    #[test]
    fn local_maps_keep_insertion_order() {
        let mut tile = Tile::new(1, TileRegion::Local);
        tile.local_map_mut(0, "edge2node").extend([3, 4]);
        tile.local_map_mut(0, "edge2cell").push(7);
        let names: Vec<_> = tile.local_map_names(0).collect();
        assert_eq!(names, ["edge2node", "edge2cell"]);
        assert_eq!(tile.local_map(0, "edge2node"), Some(&[3i32, 4][..]));
        assert_eq!(tile.local_map(0, "missing"), None);
    }
}
