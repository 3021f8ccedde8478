//! Extra-conflict tracking between tiles.

use std::collections::BTreeSet;

/// Per-tile record of other tiles that must not share a color, beyond what
/// the seed map's one-hop adjacency can see.
///
/// Built by the caller from mesh connectivity (a tile's dependency
/// footprint can grow wider than one hop when its frontier expands across
/// loops) and read-only to the coloring engine. Partner sets are symmetric:
/// adding `(a, b)` also records `(b, a)`.
///
/// Iteration over partners is in ascending tile order, keeping the coloring
/// passes deterministic.
#[derive(Clone, Debug, Default)]
pub struct ConflictTracker {
    entries: Vec<BTreeSet<usize>>,
}

impl ConflictTracker {
    /// An empty tracker sized for `n_tiles` tiles.
    pub fn new(n_tiles: usize) -> Self {
        Self {
            entries: vec![BTreeSet::new(); n_tiles],
        }
    }

    /// Record that tiles `a` and `b` conflict.
    ///
    /// Grows the tracker if either index is beyond the current size.
    /// Self-conflicts are ignored.
    pub fn add_conflict(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let needed = a.max(b) + 1;
        if self.entries.len() < needed {
            self.entries.resize_with(needed, BTreeSet::new);
        }
        self.entries[a].insert(b);
        self.entries[b].insert(a);
    }

    /// Tiles recorded as conflicting with `tile`, in ascending order.
    ///
    /// An index beyond the tracker's size yields an empty iterator: the
    /// tracker is advisory, and a caller that sized it for fewer tiles than
    /// the partitioner produced simply contributes no extra conflicts there.
    pub fn partners(&self, tile: usize) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .get(tile)
            .into_iter()
            .flat_map(|s| s.iter().copied())
    }

    /// Number of recorded partners for `tile`.
    pub fn degree(&self, tile: usize) -> usize {
        self.entries.get(tile).map_or(0, BTreeSet::len)
    }

    /// Largest partner-set size across all tiles.
    pub fn max_degree(&self) -> usize {
        self.entries.iter().map(BTreeSet::len).max().unwrap_or(0)
    }

    /// True if no conflicts are recorded at all.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(BTreeSet::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_symmetric() {
        let mut t = ConflictTracker::new(3);
        t.add_conflict(0, 2);
        assert_eq!(t.partners(0).collect::<Vec<_>>(), [2]);
        assert_eq!(t.partners(2).collect::<Vec<_>>(), [0]);
        assert_eq!(t.partners(1).count(), 0);
    }

    #[test]
    fn self_conflicts_are_ignored() {
        let mut t = ConflictTracker::new(2);
        t.add_conflict(1, 1);
        assert!(t.is_empty());
    }

    #[test]
    fn add_conflict_grows_the_tracker() {
        let mut t = ConflictTracker::new(1);
        t.add_conflict(0, 5);
        assert_eq!(t.partners(5).collect::<Vec<_>>(), [0]);
        assert_eq!(t.max_degree(), 1);
    }

    #[test]
    fn out_of_range_partner_query_is_empty() {
        let t = ConflictTracker::new(1);
        assert_eq!(t.partners(10).count(), 0);
        assert_eq!(t.degree(10), 0);
    }

    #[test]
    fn partners_iterate_in_ascending_order() {
        let mut t = ConflictTracker::new(4);
        t.add_conflict(1, 3);
        t.add_conflict(1, 0);
        t.add_conflict(1, 2);
        assert_eq!(t.partners(1).collect::<Vec<_>>(), [0, 2, 3]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Whatever pairs go in, the tracker stays symmetric and its
            /// max degree matches the densest partner set.
            #[test]
            fn tracker_stays_symmetric(pairs in proptest::collection::vec((0usize..12, 0usize..12), 0..40)) {
                let mut t = ConflictTracker::new(12);
                for &(a, b) in &pairs {
                    t.add_conflict(a, b);
                }
                for a in 0..12 {
                    for b in t.partners(a).collect::<Vec<_>>() {
                        prop_assert!(t.partners(b).any(|p| p == a));
                        prop_assert_ne!(a, b);
                    }
                }
                let densest = (0..12).map(|a| t.degree(a)).max().unwrap_or(0);
                prop_assert_eq!(t.max_degree(), densest);
            }
        }
    }
}
