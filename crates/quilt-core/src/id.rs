//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an iteration set within a mesh arena.
///
/// Sets are registered once and assigned sequential IDs; `SetId(n)` is the
/// n-th set added to the arena. IDs are copyable handles — true sharing (a
/// set referenced by several maps and loops) is expressed by copying the ID,
/// never by aliasing the underlying storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(pub u32);

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SetId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies an indirection map within a mesh arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub u32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MapId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// An execution-group identifier assigned to a tile.
///
/// Tiles sharing a color touch no common data and may run concurrently;
/// color classes execute in ascending numeric order, so a larger color
/// always runs after a smaller one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Color {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
