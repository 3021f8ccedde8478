//! Error types for the coloring engine.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Errors from a coloring run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColoringError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// Adjacency-safe coloring was requested without a seed map.
    MissingSeedMap,
    /// The seed map's source set disagrees with the iteration space being
    /// colored.
    SeedMapMismatch {
        /// Source size of the supplied seed map.
        seed_map_in: u32,
        /// Size of the iteration set behind `iter2tile`.
        iterations: u32,
    },
    /// A pass colored zero previously-uncolored core tiles. This signals a
    /// malformed conflict tracker or a logic error in mask computation and
    /// is never retried.
    Exhausted {
        /// The pass (1-based) that made no progress.
        pass: u32,
    },
}

impl fmt::Display for ColoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid coloring config: {e}"),
            Self::MissingSeedMap => {
                write!(f, "adjacency-safe coloring requires a seed map")
            }
            Self::SeedMapMismatch {
                seed_map_in,
                iterations,
            } => write!(
                f,
                "seed map covers {seed_map_in} elements but the loop has {iterations} iterations"
            ),
            Self::Exhausted { pass } => {
                write!(f, "coloring pass {pass} made no progress")
            }
        }
    }
}

impl Error for ColoringError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}
