//! The inspector: orchestration of partition, coloring, and tiling.

use std::fmt;

use quilt_core::{
    assign_loop, AccessDescriptor, ConflictTracker, MapId, Set, SetId, Tile, TileRegions,
};
use quilt_map::{Map, MeshArena};

use quilt_color::{color_tiles, Policy};

use crate::config::{ConfigError, InspectorConfig};
use crate::error::InspectorError;
use crate::loops::Loop;
use crate::metrics::InspectionMetrics;
use crate::partition::Partitioner;
use crate::project::{Projection, Projector, TilingSnapshot};

// ── Phase ───────────────────────────────────────────────────────

/// State of the inspection, advanced by [`Inspector::add_loop`] and
/// [`Inspector::run`].
///
/// A failed run leaves the phase at the last completed state, so callers
/// can see exactly how far the chain got.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No loops registered yet.
    Init,
    /// At least one loop registered; ready to run.
    LoopsRegistered,
    /// Seed loop partitioned, its tiles assigned and colored.
    SeedPartitionedAndColored,
    /// Every loop after the seed is tiled.
    ForwardTiled,
    /// Every loop before the seed is tiled.
    BackwardTiled,
    /// The whole chain is tiled; a schedule can be extracted.
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Init => "init",
            Self::LoopsRegistered => "loops-registered",
            Self::SeedPartitionedAndColored => "seed-partitioned-and-colored",
            Self::ForwardTiled => "forward-tiled",
            Self::BackwardTiled => "backward-tiled",
            Self::Done => "done",
        };
        f.write_str(s)
    }
}

// ── RunReport / Schedule ────────────────────────────────────────

/// Result of a successful [`Inspector::run`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Chain positions in the order they were tiled: the seed first, then
    /// the forward walk, then the backward walk.
    pub tiled: Vec<usize>,
    /// Statistics of the run.
    pub metrics: InspectionMetrics,
}

/// The scheduling metadata handed to a downstream executor.
///
/// Extracted by [`Inspector::into_schedule`], which consumes the
/// inspector: tile ownership passes to the executor, while the inspector's
/// loops, sets, and remaining maps drop with its arena. The two maps here
/// are independent copies, valid for as long as the executor keeps them.
#[derive(Clone, Debug)]
pub struct Schedule {
    /// The tiles, with per-loop iteration lists and final colors.
    pub tiles: Vec<Tile>,
    /// Seed-loop iteration → tile id.
    pub iter2tile: Map,
    /// Seed-loop iteration → color id.
    pub iter2color: Map,
    /// Chain position of the seed loop.
    pub seed: usize,
}

// ── Inspector ───────────────────────────────────────────────────

/// Precomputes a tile + color schedule for a chain of indirect loops.
///
/// Usage: create with a validated [`InspectorConfig`], register sets and
/// maps through [`arena_mut`](Inspector::arena_mut), register the loop
/// chain with [`add_loop`](Inspector::add_loop), then [`run`](Inspector::run)
/// with a seed position and the external partitioner / projector. After a
/// successful run the schedule is queryable in place or extractable with
/// [`into_schedule`](Inspector::into_schedule).
///
/// The inspector is synchronous and single-threaded; nothing here blocks,
/// suspends, or communicates. In a distributed deployment each rank runs
/// its own inspector over its halo-augmented partition.
pub struct Inspector {
    config: InspectorConfig,
    arena: MeshArena,
    loops: Vec<Loop>,
    phase: Phase,
    seed: Option<usize>,
    iter2tile: Option<MapId>,
    iter2color: Option<MapId>,
    tiles: Vec<Tile>,
    regions: TileRegions,
    tiled_loops: Vec<usize>,
    metrics: InspectionMetrics,
}

impl Inspector {
    /// Create an inspector from a validated configuration.
    pub fn new(config: InspectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            arena: MeshArena::new(),
            loops: Vec::new(),
            phase: Phase::Init,
            seed: None,
            iter2tile: None,
            iter2color: None,
            tiles: Vec::new(),
            regions: TileRegions::default(),
            tiled_loops: Vec::new(),
            metrics: InspectionMetrics::default(),
        })
    }

    /// The entity arena holding this problem's sets and maps.
    pub fn arena(&self) -> &MeshArena {
        &self.arena
    }

    /// Mutable arena access, for registering the problem's sets and maps.
    pub fn arena_mut(&mut self) -> &mut MeshArena {
        &mut self.arena
    }

    /// Append a loop to the chain. Returns its chain position.
    pub fn add_loop(
        &mut self,
        name: impl Into<String>,
        set: SetId,
        descriptors: Vec<AccessDescriptor>,
    ) -> usize {
        let index = self.loops.len();
        self.loops.push(Loop {
            name: name.into(),
            set,
            index,
            descriptors,
        });
        if self.phase == Phase::Init {
            self.phase = Phase::LoopsRegistered;
        }
        index
    }

    /// The registered loop chain, in order.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Number of registered loops.
    pub fn n_loops(&self) -> usize {
        self.loops.len()
    }

    /// Current phase of the inspection.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The seed position, once `run` has been called.
    pub fn seed(&self) -> Option<usize> {
        self.seed
    }

    /// The configuration this inspector was built with.
    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Statistics of the last successful run.
    pub fn metrics(&self) -> &InspectionMetrics {
        &self.metrics
    }

    /// Chain positions tiled so far, in tiling order.
    pub fn tiled_loops(&self) -> &[usize] {
        &self.tiled_loops
    }

    /// The tile list (empty before `run`).
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Region split of the tile list.
    pub fn regions(&self) -> TileRegions {
        self.regions
    }

    /// Seed-loop iteration → tile map, once partitioning has happened.
    pub fn iter2tile(&self) -> Option<&Map> {
        self.iter2tile.map(|id| self.arena.map(id))
    }

    /// Seed-loop iteration → color map, once coloring has happened.
    pub fn iter2color(&self) -> Option<&Map> {
        self.iter2color.map(|id| self.arena.map(id))
    }

    /// Iterations owned by a tile for a given loop.
    pub fn tile_iterations(&self, tile: usize, loop_index: usize) -> Option<&[u32]> {
        let t = self.tiles.get(tile)?;
        (loop_index < t.crossed_loops()).then(|| t.iterations(loop_index))
    }

    /// A tile's localized map for a given loop, by global map name.
    pub fn tile_local_map(
        &self,
        tile: usize,
        loop_index: usize,
        map_name: &str,
    ) -> Option<&[i32]> {
        let t = self.tiles.get(tile)?;
        if loop_index >= t.crossed_loops() {
            return None;
        }
        t.local_map(loop_index, map_name)
    }

    /// Inspect the loop chain anchored at `seed`.
    ///
    /// Runs the full pipeline: partition the seed loop, build and assign
    /// tiles, color them under the configured strategy, then tile the rest
    /// of the chain — forward from `seed + 1` to the end, backward from
    /// `seed - 1` to the start — through `projector`.
    ///
    /// `conflicts` lists tile pairs that must not share a color despite not
    /// being adjacent in the seed map; `None` contributes no extra
    /// conflicts. Only the adjacency-safe policy consults it.
    ///
    /// # Errors
    ///
    /// Precondition violations (`NoLoops`, `AlreadyRun`, `SeedOutOfRange`,
    /// `SeedIsSubset`) reject the run before anything is modified. A
    /// collaborator failure mid-chain leaves earlier loops tiled and later
    /// ones untiled and reports exactly which via
    /// [`InspectorError::ChainIncomplete`]; the phase stays at the last
    /// completed state.
    pub fn run(
        &mut self,
        seed: usize,
        partitioner: &dyn Partitioner,
        projector: &dyn Projector,
        conflicts: Option<&ConflictTracker>,
    ) -> Result<RunReport, InspectorError> {
        match self.phase {
            Phase::Init => return Err(InspectorError::NoLoops),
            Phase::LoopsRegistered => {}
            _ => return Err(InspectorError::AlreadyRun),
        }
        let n_loops = self.loops.len();
        if seed >= n_loops {
            return Err(InspectorError::SeedOutOfRange { seed, n_loops });
        }
        let seed_set_id = self.loops[seed].set;
        let seed_set = self.arena.set(seed_set_id);
        if seed_set.is_subset {
            return Err(InspectorError::SeedIsSubset {
                name: seed_set.name.clone(),
            });
        }
        let seed_set_name = seed_set.name.clone();
        let seed_set_size = seed_set.size;
        self.seed = Some(seed);

        // Partition the seed loop's iteration set and create empty tiles.
        let partition = partitioner
            .partition(&self.loops[seed], self.config.avg_tile_size, &self.arena)
            .map_err(InspectorError::Partition)?;
        let n_tiles = partition.n_tiles;
        if partition.regions.total() != n_tiles {
            return Err(InspectorError::InvalidPartition {
                reason: format!(
                    "regions cover {} tiles but the partition produced {n_tiles}",
                    partition.regions.total()
                ),
            });
        }
        if partition.iter2tile.len() != seed_set_size as usize {
            return Err(InspectorError::InvalidPartition {
                reason: format!(
                    "iter2tile covers {} iterations of a {seed_set_size}-element set",
                    partition.iter2tile.len()
                ),
            });
        }
        let tiles_set = self
            .arena
            .add_set(Set::new("tiles", n_tiles as u32))
            .map_err(InspectorError::Map)?;
        let iter2tile_id = self
            .arena
            .add_dense_map("iter2tile", seed_set_id, tiles_set, partition.iter2tile)
            .map_err(InspectorError::Map)?;
        self.regions = partition.regions;
        self.tiles = (0..n_tiles)
            .map(|i| Tile::new(n_loops, partition.regions.region_of(i)))
            .collect();

        // Assign the seed loop's iterations.
        assign_loop(&mut self.tiles, seed, self.arena.map(iter2tile_id).values())
            .map_err(InspectorError::Assign)?;

        // Color the seed loop's tiles under the configured strategy. An
        // indirect seed loop's own map is the adjacency oracle; a
        // direct-only seed loop gets an identity oracle, under which
        // distinct tiles never conflict.
        let policy = self.config.strategy.policy();
        let needs_oracle = policy == Policy::AdjacencySafe;
        let seed_indirect = self.loops[seed].first_indirect_map();
        let identity_oracle = if needs_oracle && seed_indirect.is_none() {
            Some(
                Map::dense(
                    "seed_identity",
                    seed_set_id,
                    seed_set_size,
                    seed_set_id,
                    seed_set_size,
                    (0..seed_set_size as i32).collect(),
                )
                .map_err(InspectorError::Map)?,
            )
        } else {
            None
        };
        let seed_map: Option<&Map> = if needs_oracle {
            match seed_indirect {
                Some(mid) => Some(self.arena.map(mid)),
                None => identity_oracle.as_ref(),
            }
        } else {
            None
        };
        let coloring = color_tiles(
            policy,
            self.arena.map(iter2tile_id),
            &mut self.tiles,
            &self.regions,
            seed_map,
            conflicts,
            &self.config.coloring,
        )
        .map_err(InspectorError::Coloring)?;

        let colors_set = self
            .arena
            .add_set(Set::new("colors", coloring.n_colors))
            .map_err(InspectorError::Map)?;
        let iter2color_id = self
            .arena
            .add_dense_map(
                "iter2color",
                seed_set_id,
                colors_set,
                coloring.iter2color.clone(),
            )
            .map_err(InspectorError::Map)?;
        self.iter2tile = Some(iter2tile_id);
        self.iter2color = Some(iter2color_id);
        self.tiled_loops.push(seed);
        self.phase = Phase::SeedPartitionedAndColored;

        // Deep-copy the seed tiling: the forward and backward walks each
        // consume an independent working snapshot while the original
        // survives for the other direction.
        let seed_snapshot = TilingSnapshot::new(
            seed_set_name,
            seed_set_size,
            self.arena.map(iter2tile_id).values().to_vec(),
            coloring.iter2color,
        );
        let mut base_projection = Projection::new();

        // Forward walk: seed+1 .. n_loops.
        let mut working = Projection::new();
        let mut prev_snapshot = seed_snapshot.clone();
        let mut prev_index = seed;
        for i in seed + 1..n_loops {
            projector
                .project_forward(
                    &self.loops[prev_index],
                    &prev_snapshot,
                    &mut working,
                    &mut base_projection,
                    &self.arena,
                )
                .map_err(|source| self.chain_incomplete(i, source))?;
            let snapshot = projector
                .tile_forward(&self.loops[i], &working, &self.arena)
                .map_err(|source| self.chain_incomplete(i, source))?;
            assign_loop(&mut self.tiles, i, &snapshot.iter2tile)
                .map_err(InspectorError::Assign)?;
            self.tiled_loops.push(i);
            prev_snapshot = snapshot;
            prev_index = i;
        }
        self.phase = Phase::ForwardTiled;

        // Backward walk: the structural mirror, re-seeded from the
        // preserved original snapshot with a fresh working projection.
        let mut working = Projection::new();
        let mut prev_snapshot = seed_snapshot;
        let mut prev_index = seed;
        for i in (0..seed).rev() {
            projector
                .project_backward(
                    &self.loops[prev_index],
                    &prev_snapshot,
                    &mut working,
                    &mut base_projection,
                    &self.arena,
                )
                .map_err(|source| self.chain_incomplete(i, source))?;
            let snapshot = projector
                .tile_backward(&self.loops[i], &working, &self.arena)
                .map_err(|source| self.chain_incomplete(i, source))?;
            assign_loop(&mut self.tiles, i, &snapshot.iter2tile)
                .map_err(InspectorError::Assign)?;
            self.tiled_loops.push(i);
            prev_snapshot = snapshot;
            prev_index = i;
        }
        self.phase = Phase::BackwardTiled;
        self.localize_maps();
        self.phase = Phase::Done;

        self.metrics = InspectionMetrics {
            n_loops,
            n_tiles,
            n_colors: coloring.n_colors,
            coloring_passes: coloring.passes,
            max_tile_size: self
                .tiles
                .iter()
                .map(|t| t.iterations(seed).len())
                .max()
                .unwrap_or(0),
            seed_set_size,
        };
        Ok(RunReport {
            tiled: self.tiled_loops.clone(),
            metrics: self.metrics.clone(),
        })
    }

    /// Hand the schedule to the executor, consuming the inspector.
    ///
    /// Tile ownership moves out; the arena (loops, sets, and every map a
    /// descriptor references) drops here, each entity exactly once. The
    /// returned maps are independent copies.
    ///
    /// # Errors
    ///
    /// [`InspectorError::ScheduleUnavailable`] unless the chain was fully
    /// tiled ([`Phase::Done`]).
    pub fn into_schedule(self) -> Result<Schedule, InspectorError> {
        if self.phase != Phase::Done {
            return Err(InspectorError::ScheduleUnavailable { phase: self.phase });
        }
        let iter2tile = self
            .arena
            .map(self.iter2tile.expect("iter2tile set once Done"))
            .clone();
        let iter2color = self
            .arena
            .map(self.iter2color.expect("iter2color set once Done"))
            .clone();
        Ok(Schedule {
            tiles: self.tiles,
            iter2tile,
            iter2color,
            seed: self.seed.expect("seed set once Done"),
        })
    }

    /// Build each tile's slice of every indirection map the chain uses:
    /// per loop, a tile's local map is the concatenation of the global
    /// map's target slices over the tile's owned iterations. The executor
    /// then walks a tile without touching the global maps.
    ///
    /// Only maps departing from a loop's own iteration set can be
    /// localized through that loop; a map shared by several descriptors of
    /// one loop is localized once.
    fn localize_maps(&mut self) {
        for l in 0..self.loops.len() {
            let loop_set = self.loops[l].set;
            let mut localized: Vec<MapId> = Vec::new();
            for desc in &self.loops[l].descriptors {
                let Some(mid) = desc.map() else { continue };
                if localized.contains(&mid) {
                    continue;
                }
                localized.push(mid);
                let map = self.arena.map(mid);
                if map.in_set() != loop_set {
                    continue;
                }
                for tile in &mut self.tiles {
                    let local: Vec<i32> = tile
                        .iterations(l)
                        .iter()
                        .flat_map(|&it| map.slice(it as usize).iter().copied())
                        .collect();
                    *tile.local_map_mut(l, map.name()) = local;
                }
            }
        }
    }

    fn chain_incomplete(
        &self,
        failed: usize,
        source: crate::project::ProjectionError,
    ) -> InspectorError {
        InspectorError::ChainIncomplete {
            tiled: self.tiled_loops.clone(),
            failed,
            source,
        }
    }
}
