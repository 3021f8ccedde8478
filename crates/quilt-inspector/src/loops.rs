//! Registered loops of the chain.

use quilt_core::{AccessDescriptor, SetId};

/// One loop of the chain, registered with the inspector in chain order.
#[derive(Clone, Debug)]
pub struct Loop {
    /// Human-readable loop name, used in diagnostics.
    pub name: String,
    /// The iteration set this loop runs over.
    pub set: SetId,
    /// Position of the loop in the chain.
    pub index: usize,
    /// How the loop accesses data: one descriptor per accessed dataset.
    /// Opaque to the inspector core beyond being handed to projection.
    pub descriptors: Vec<AccessDescriptor>,
}

impl Loop {
    /// The first indirection map among this loop's descriptors, if any.
    ///
    /// For an indirect loop this is the adjacency oracle the coloring
    /// engine uses as its seed map.
    pub fn first_indirect_map(&self) -> Option<quilt_core::MapId> {
        self.descriptors.iter().find_map(AccessDescriptor::map)
    }
}
