//! Coloring configuration and validation.

use std::error::Error;
use std::fmt;

/// Where halo tiles land relative to core colors in the adjacency-safe
/// policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HaloOrdering {
    /// Exec-halo tiles are colored alongside core tiles; only the trailing
    /// non-exec run is pushed after the resolved colors. Suits executors
    /// that overlap halo exchange with core computation.
    #[default]
    Mixed,
    /// Exec-halo tile colors are shifted strictly above every core color
    /// (preserving their relative order), and any non-exec color lands
    /// above those. Suits executors without latency hiding, which need all
    /// core work finished before any halo tile starts.
    AfterCore,
}

/// Configuration for the coloring policies.
#[derive(Clone, Debug)]
pub struct ColoringConfig {
    /// Number of colors searched per adjacency-safe pass. Each pass covers
    /// a disjoint batch of this many colors in a `u64` mask word, so the
    /// width is capped at 64. Default: 32.
    pub batch_width: u32,
    /// Seed for the [`color_random`](crate::color_random) permutation.
    /// Equal seeds produce equal colorings. Default: 0.
    pub seed: u64,
    /// Halo placement policy for
    /// [`color_adjacency_safe`](crate::color_adjacency_safe).
    pub halo_ordering: HaloOrdering,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            batch_width: 32,
            seed: 0,
            halo_ordering: HaloOrdering::default(),
        }
    }
}

impl ColoringConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_width == 0 {
            return Err(ConfigError::ZeroBatchWidth);
        }
        if self.batch_width > 64 {
            return Err(ConfigError::BatchWidthTooWide {
                configured: self.batch_width,
            });
        }
        Ok(())
    }

    /// Mask of the low `batch_width` bits.
    pub(crate) fn batch_mask(&self) -> u64 {
        if self.batch_width == 64 {
            u64::MAX
        } else {
            (1u64 << self.batch_width) - 1
        }
    }
}

/// Errors detected during [`ColoringConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero batch width can never color anything.
    ZeroBatchWidth,
    /// The batch width exceeds the 64-bit mask word.
    BatchWidthTooWide {
        /// The configured width.
        configured: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatchWidth => write!(f, "batch width must be at least 1"),
            Self::BatchWidthTooWide { configured } => {
                write!(f, "batch width {configured} exceeds the 64-bit mask word")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = ColoringConfig::default();
        assert_eq!(c.batch_width, 32);
        assert_eq!(c.halo_ordering, HaloOrdering::Mixed);
        c.validate().unwrap();
    }

    #[test]
    fn zero_width_rejected() {
        let c = ColoringConfig {
            batch_width: 0,
            ..Default::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroBatchWidth));
    }

    #[test]
    fn wide_width_rejected() {
        let c = ColoringConfig {
            batch_width: 65,
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::BatchWidthTooWide { configured: 65 })
        );
    }

    #[test]
    fn batch_mask_covers_the_width() {
        let mut c = ColoringConfig::default();
        assert_eq!(c.batch_mask(), 0xFFFF_FFFF);
        c.batch_width = 64;
        assert_eq!(c.batch_mask(), u64::MAX);
        c.batch_width = 1;
        assert_eq!(c.batch_mask(), 1);
    }
}
