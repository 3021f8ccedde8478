//! Id-addressed owner for sets and maps.

use indexmap::IndexMap;
use quilt_core::{MapId, Set, SetId};

use crate::error::MapError;
use crate::map::Map;

/// Single owner of a problem's sets and indirection maps.
///
/// Everything else in the workspace refers to mesh entities through
/// copyable [`SetId`]/[`MapId`] handles, so a set referenced by several
/// maps and loops has exactly one owner and is dropped exactly once — the
/// arena's `Drop`. There is no removal: ids handed out stay valid for the
/// arena's lifetime.
#[derive(Debug, Default)]
pub struct MeshArena {
    sets: Vec<Set>,
    maps: Vec<Map>,
    set_names: IndexMap<String, SetId>,
    map_names: IndexMap<String, MapId>,
}

impl MeshArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a set. Names are unique within one arena.
    pub fn add_set(&mut self, set: Set) -> Result<SetId, MapError> {
        if self.set_names.contains_key(&set.name) {
            return Err(MapError::DuplicateSetName {
                name: set.name.clone(),
            });
        }
        let id = SetId(self.sets.len() as u32);
        self.set_names.insert(set.name.clone(), id);
        self.sets.push(set);
        Ok(id)
    }

    /// The set behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    pub fn set(&self, id: SetId) -> &Set {
        &self.sets[id.0 as usize]
    }

    /// Look up a set id by name.
    pub fn set_by_name(&self, name: &str) -> Option<SetId> {
        self.set_names.get(name).copied()
    }

    /// Build and register a fixed-arity map between two registered sets.
    pub fn add_dense_map(
        &mut self,
        name: impl Into<String>,
        in_set: SetId,
        out_set: SetId,
        values: Vec<i32>,
    ) -> Result<MapId, MapError> {
        let (in_size, out_size) = self.endpoint_sizes(in_set, out_set)?;
        let map = Map::dense(name, in_set, in_size, out_set, out_size, values)?;
        self.insert_map(map)
    }

    /// Build and register a variable-arity (CSR) map between two registered
    /// sets.
    pub fn add_ragged_map(
        &mut self,
        name: impl Into<String>,
        in_set: SetId,
        out_set: SetId,
        values: Vec<i32>,
        offsets: Vec<u32>,
    ) -> Result<MapId, MapError> {
        let (in_size, out_size) = self.endpoint_sizes(in_set, out_set)?;
        let map = Map::ragged(name, in_set, in_size, out_set, out_size, values, offsets)?;
        self.insert_map(map)
    }

    /// Register a map built elsewhere (e.g. an inversion result) whose
    /// endpoint ids belong to this arena.
    pub fn insert_map(&mut self, map: Map) -> Result<MapId, MapError> {
        self.endpoint_sizes(map.in_set(), map.out_set())?;
        if self.map_names.contains_key(map.name()) {
            return Err(MapError::DuplicateMapName {
                name: map.name().to_owned(),
            });
        }
        let id = MapId(self.maps.len() as u32);
        self.map_names.insert(map.name().to_owned(), id);
        self.maps.push(map);
        Ok(id)
    }

    /// The map behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this arena.
    pub fn map(&self, id: MapId) -> &Map {
        &self.maps[id.0 as usize]
    }

    /// Look up a map id by name.
    pub fn map_by_name(&self, name: &str) -> Option<MapId> {
        self.map_names.get(name).copied()
    }

    /// Number of registered sets.
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Number of registered maps.
    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    fn endpoint_sizes(&self, in_set: SetId, out_set: SetId) -> Result<(u32, u32), MapError> {
        let in_size = self
            .sets
            .get(in_set.0 as usize)
            .ok_or(MapError::UnknownSet { id: in_set })?
            .size;
        let out_size = self
            .sets
            .get(out_set.0 as usize)
            .ok_or(MapError::UnknownSet { id: out_set })?
            .size;
        Ok((in_size, out_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_and_maps_are_addressable_by_id_and_name() {
        let mut arena = MeshArena::new();
        let edges = arena.add_set(Set::new("edges", 3)).unwrap();
        let nodes = arena.add_set(Set::new("nodes", 3)).unwrap();
        let e2n = arena
            .add_dense_map("edge2node", edges, nodes, vec![0, 1, 1, 2, 2, 0])
            .unwrap();

        assert_eq!(arena.set(edges).name, "edges");
        assert_eq!(arena.set_by_name("nodes"), Some(nodes));
        assert_eq!(arena.map(e2n).arity(), Some(2));
        assert_eq!(arena.map_by_name("edge2node"), Some(e2n));
        assert_eq!(arena.set_count(), 2);
        assert_eq!(arena.map_count(), 1);
    }

    #[test]
    fn one_set_shared_by_two_maps() {
        let mut arena = MeshArena::new();
        let edges = arena.add_set(Set::new("edges", 2)).unwrap();
        let nodes = arena.add_set(Set::new("nodes", 3)).unwrap();
        arena
            .add_dense_map("e2n_a", edges, nodes, vec![0, 1, 1, 2])
            .unwrap();
        arena
            .add_dense_map("e2n_b", edges, nodes, vec![2, 0, 0, 1])
            .unwrap();
        // both maps resolve the same set storage; dropping the arena frees
        // each entity exactly once (single ownership by construction)
        assert_eq!(arena.map(MapId(0)).out_set(), arena.map(MapId(1)).out_set());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut arena = MeshArena::new();
        arena.add_set(Set::new("edges", 2)).unwrap();
        assert!(matches!(
            arena.add_set(Set::new("edges", 5)),
            Err(MapError::DuplicateSetName { .. })
        ));
    }

    #[test]
    fn unknown_set_is_rejected() {
        let mut arena = MeshArena::new();
        let edges = arena.add_set(Set::new("edges", 2)).unwrap();
        assert!(matches!(
            arena.add_dense_map("m", edges, SetId(9), vec![0, 0]),
            Err(MapError::UnknownSet { id: SetId(9) })
        ));
    }

    #[test]
    fn map_validation_runs_against_registered_sizes() {
        let mut arena = MeshArena::new();
        let edges = arena.add_set(Set::new("edges", 2)).unwrap();
        let nodes = arena.add_set(Set::new("nodes", 2)).unwrap();
        assert!(matches!(
            arena.add_dense_map("m", edges, nodes, vec![0, 2]),
            Err(MapError::TargetOutOfRange { value: 2, .. })
        ));
    }
}
