//! Inspector configuration and validation.

use std::error::Error;
use std::fmt;

use quilt_color::{ColoringConfig, Policy};

/// Execution strategy of the downstream executor.
///
/// The strategy selects the coloring policy here and, externally, the
/// execution backend the schedule is handed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Single-threaded execution: tiles run one after another.
    Sequential,
    /// Distributed-memory execution, one thread per rank: all local tiles
    /// may run in one sweep, halo tiles after the exchange.
    Mpi,
    /// Shared-memory threading: conflicting tiles must take distinct colors.
    Omp,
    /// Distributed ranks with shared-memory threading inside each.
    OmpMpi,
}

impl Strategy {
    /// The coloring policy this strategy requires.
    pub fn policy(self) -> Policy {
        match self {
            Self::Sequential => Policy::Sequential,
            Self::Mpi => Policy::FullyParallel,
            Self::Omp | Self::OmpMpi => Policy::AdjacencySafe,
        }
    }
}

/// Builder-input for constructing an [`Inspector`](crate::Inspector).
#[derive(Clone, Debug)]
pub struct InspectorConfig {
    /// Requested average number of seed-loop iterations per tile. The
    /// partitioner produces roughly `set.size / avg_tile_size` tiles.
    pub avg_tile_size: u32,
    /// Execution strategy of the downstream executor.
    pub strategy: Strategy,
    /// Configuration forwarded to the coloring engine.
    pub coloring: ColoringConfig,
}

impl InspectorConfig {
    /// Configuration with the given tile size and strategy, default
    /// coloring settings.
    pub fn new(avg_tile_size: u32, strategy: Strategy) -> Self {
        Self {
            avg_tile_size,
            strategy,
            coloring: ColoringConfig::default(),
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.avg_tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        self.coloring.validate().map_err(ConfigError::Coloring)
    }
}

/// Errors detected during [`InspectorConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero average tile size cannot partition anything.
    ZeroTileSize,
    /// The coloring configuration is invalid.
    Coloring(quilt_color::ConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTileSize => write!(f, "average tile size must be at least 1"),
            Self::Coloring(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Coloring(e) => Some(e),
            Self::ZeroTileSize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_map_to_policies() {
        assert_eq!(Strategy::Sequential.policy(), Policy::Sequential);
        assert_eq!(Strategy::Mpi.policy(), Policy::FullyParallel);
        assert_eq!(Strategy::Omp.policy(), Policy::AdjacencySafe);
        assert_eq!(Strategy::OmpMpi.policy(), Policy::AdjacencySafe);
    }

    #[test]
    fn zero_tile_size_rejected() {
        let c = InspectorConfig::new(0, Strategy::Sequential);
        assert_eq!(c.validate(), Err(ConfigError::ZeroTileSize));
    }

    #[test]
    fn coloring_errors_propagate() {
        let mut c = InspectorConfig::new(16, Strategy::Omp);
        c.coloring.batch_width = 0;
        assert!(matches!(c.validate(), Err(ConfigError::Coloring(_))));
    }
}
