//! Access descriptors: how a loop touches data.

use crate::id::MapId;

/// How a loop accesses a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessMode {
    /// Read-only access.
    Read,
    /// Write-only access.
    Write,
    /// Associative increment (order-insensitive accumulation).
    Inc,
    /// Read-modify-write access.
    ReadWrite,
}

/// What a loop accesses a dataset *through*.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessTarget {
    /// Direct access: iteration `i` touches element `i` of its own set.
    Direct,
    /// Indirect access through an indirection map.
    Indirect(MapId),
}

/// One (target, mode) pair in a loop's descriptor list.
///
/// Descriptors are opaque to the inspector core beyond being handed to the
/// projection primitives, which use them to propagate a tiling across the
/// loop chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessDescriptor {
    /// Direct, or indirect through a map.
    pub target: AccessTarget,
    /// The access mode.
    pub mode: AccessMode,
}

impl AccessDescriptor {
    /// A direct-access descriptor.
    pub fn direct(mode: AccessMode) -> Self {
        Self {
            target: AccessTarget::Direct,
            mode,
        }
    }

    /// An indirect-access descriptor through `map`.
    pub fn indirect(map: MapId, mode: AccessMode) -> Self {
        Self {
            target: AccessTarget::Indirect(map),
            mode,
        }
    }

    /// The map this descriptor goes through, if any.
    pub fn map(&self) -> Option<MapId> {
        match self.target {
            AccessTarget::Direct => None,
            AccessTarget::Indirect(m) => Some(m),
        }
    }
}
