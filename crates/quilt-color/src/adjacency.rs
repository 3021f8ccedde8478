//! Adjacency-safe coloring: the general conflict-aware policy.

use quilt_core::{Color, ConflictTracker, Tile, TileRegions};
use quilt_map::{Map, OFF_RANK};

use crate::apply::apply;
use crate::config::{ColoringConfig, HaloOrdering};
use crate::error::ColoringError;
use crate::policy::Coloring;

/// Color tiles so that no two conflicting tiles share a color.
///
/// Two tiles conflict when they touch a common element of `seed_map`'s
/// target set through their owned iterations, or when `tracker` lists them
/// as conflicting — the tracker captures dependency footprints wider than
/// the one hop `seed_map` alone can see.
///
/// The search runs in passes, each covering a disjoint batch of
/// `config.batch_width` colors. Within a pass, core tiles (all tiles
/// except the trailing non-exec run) are visited in ascending index order;
/// each uncolored tile takes the lowest color whose bit is unset in the
/// OR of the per-element `work` masks it can reach. Tiles that find no
/// free bit wait for the next batch. Already-colored tiles are never
/// revisited, and a pass that colors nothing fails with
/// [`ColoringError::Exhausted`] rather than looping.
///
/// Processing is deterministic: identical inputs yield identical colorings
/// across runs. In a distributed deployment each rank colors its own
/// halo-augmented partition independently — nothing here reconciles the
/// colors two ranks assign to a shared halo region, which remains the
/// caller's hazard to close.
pub fn color_adjacency_safe(
    iter2tile: &Map,
    tiles: &mut [Tile],
    regions: &TileRegions,
    seed_map: &Map,
    tracker: &ConflictTracker,
    config: &ColoringConfig,
) -> Result<Coloring, ColoringError> {
    config.validate().map_err(ColoringError::Config)?;
    if seed_map.in_size() != iter2tile.in_size() {
        return Err(ColoringError::SeedMapMismatch {
            seed_map_in: seed_map.in_size(),
            iterations: iter2tile.in_size(),
        });
    }
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
    let core_visit = n_tiles - regions.non_exec_halo;

    let tile2iter = iter2tile.invert();
    let t2i = &tile2iter.map;

    let batch_mask = config.batch_mask();
    let mut colors: Vec<Option<u32>> = vec![None; n_tiles];
    let mut work = vec![0u64; seed_map.out_size() as usize];
    let mut base = 0u32;
    let mut n_colors = 0u32;
    let mut passes = 0u32;

    loop {
        passes += 1;
        let mut repeat = false;
        let mut progressed = false;
        work.fill(0);

        for i in 0..core_visit {
            if colors[i].is_some() {
                continue;
            }
            let (t_off, t_len) = t2i.offsets_of(i);
            let own = &t2i.values()[t_off..t_off + t_len];

            let mut mask = 0u64;
            for partner in tracker.partners(i) {
                if partner >= n_tiles {
                    continue;
                }
                // probe the seed-map image of the partner's first iteration
                let (p_off, p_len) = t2i.offsets_of(partner);
                if p_len > 0 {
                    let first = t2i.values()[p_off] as usize;
                    if let Some(&e) = seed_map.slice(first).first() {
                        if e != OFF_RANK {
                            mask |= work[e as usize];
                        }
                    }
                }
                // a partner colored in an earlier batch cannot collide with
                // any color choosable this pass, so only in-batch colors
                // contribute a bit
                if let Some(c) = colors[partner] {
                    if c >= base && c - base < 64 {
                        mask |= 1 << (c - base);
                    }
                }
            }
            for &it in own {
                for &e in seed_map.slice(it as usize) {
                    if e != OFF_RANK {
                        mask |= work[e as usize];
                    }
                }
            }

            let free = !mask & batch_mask;
            if free == 0 {
                // out of colors in this batch
                repeat = true;
                continue;
            }
            let bit = free.trailing_zeros();
            colors[i] = Some(base + bit);
            progressed = true;
            n_colors = n_colors.max(base + bit + 1);
            let color_bit = 1u64 << bit;
            for &it in own {
                for &e in seed_map.slice(it as usize) {
                    if e != OFF_RANK {
                        work[e as usize] |= color_bit;
                    }
                }
            }
        }

        // the trailing non-exec run has no usable mappings; defer it to a
        // single fresh color after all resolved core colors
        if regions.non_exec_halo > 0 {
            for c in colors[core_visit..].iter_mut() {
                *c = Some(n_colors);
            }
            n_colors += 1;
        }

        if !repeat {
            break;
        }
        if !progressed {
            return Err(ColoringError::Exhausted { pass: passes });
        }
        base += config.batch_width;
    }

    let mut final_colors: Vec<u32> = colors
        .into_iter()
        .map(|c| c.expect("every tile colored once the passes settle"))
        .collect();

    if config.halo_ordering == HaloOrdering::AfterCore && regions.exec_halo > 0 {
        let core_end = regions.core;
        let exec_end = core_end + regions.exec_halo;
        let shift = final_colors[..core_end]
            .iter()
            .map(|&c| c + 1)
            .max()
            .unwrap_or(0);
        for c in &mut final_colors[core_end..exec_end] {
            *c += shift;
        }
        n_colors = final_colors[core_end..exec_end]
            .iter()
            .map(|&c| c + 1)
            .max()
            .expect("exec-halo run is non-empty");
        if regions.non_exec_halo > 0 {
            for c in &mut final_colors[exec_end..] {
                *c = n_colors;
            }
            n_colors += 1;
        }
    }

    let tile_colors: Vec<Color> = final_colors.into_iter().map(Color).collect();
    let iter2color = apply(&tile_colors, t2i, tiles);

    Ok(Coloring {
        tile_colors,
        iter2color,
        n_colors,
        passes,
    })
}
