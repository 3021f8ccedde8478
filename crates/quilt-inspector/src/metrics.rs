//! Inspection statistics.

/// Counters collected during a successful [`run`](crate::Inspector::run),
/// for telemetry and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InspectionMetrics {
    /// Number of loops in the chain at run time.
    pub n_loops: usize,
    /// Number of tiles the partitioner produced.
    pub n_tiles: usize,
    /// Number of color classes in the final coloring.
    pub n_colors: u32,
    /// Number of coloring passes taken (1 unless a batch overflowed).
    pub coloring_passes: u32,
    /// Largest number of seed-loop iterations owned by any one tile.
    pub max_tile_size: usize,
    /// Size of the seed loop's iteration set.
    pub seed_set_size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = InspectionMetrics::default();
        assert_eq!(m.n_loops, 0);
        assert_eq!(m.n_tiles, 0);
        assert_eq!(m.n_colors, 0);
        assert_eq!(m.coloring_passes, 0);
        assert_eq!(m.max_tile_size, 0);
        assert_eq!(m.seed_set_size, 0);
    }
}
