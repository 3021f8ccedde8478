//! Map inversion: building the reverse relation.

use crate::map::{Map, MapStorage, OFF_RANK};

/// Result of [`Map::invert`]: the reverse relation plus the largest fan-in
/// observed while building it.
#[derive(Clone, Debug)]
pub struct Inverted {
    /// The inverse map, always ragged (fan-in varies per target).
    pub map: Map,
    /// Largest number of sources mapping to any single target. Callers use
    /// this to size auxiliary structures (e.g. per-element scratch).
    pub max_incidence: usize,
}

impl Map {
    /// Build the reverse relation in two linear passes over the entries.
    ///
    /// Pass 1 histograms the number of sources per target (skipping
    /// [`OFF_RANK`] sentinels) and turns the counts into CSR offsets by
    /// exclusive prefix sum, tracking the maximum incidence. Pass 2
    /// scatters each source id into its target's slot with a per-target
    /// running cursor. Cost O(entries).
    ///
    /// The result is a fresh allocation named `inverse_<name>` with the
    /// endpoint sets swapped; it never aliases `self`, so its lifetime is
    /// independent of the source map's. Sentinel entries are dropped: an
    /// off-rank target has no local identity to invert through, so `-1`
    /// never appears as a source id in the result.
    ///
    /// Entry validity was established at construction, so inversion itself
    /// cannot fail.
    pub fn invert(&self) -> Inverted {
        let in_size = self.in_size as usize;
        let out_size = self.out_size as usize;

        // Pass 1: histogram into offsets[1..], then exclusive prefix sum.
        let mut offsets = vec![0u32; out_size + 1];
        for &v in &self.values {
            if v != OFF_RANK {
                offsets[v as usize + 1] += 1;
            }
        }
        let mut max_incidence = 0u32;
        for i in 1..=out_size {
            max_incidence = max_incidence.max(offsets[i]);
            offsets[i] += offsets[i - 1];
        }

        // Pass 2: scatter source ids, advancing a per-target cursor.
        let total = offsets[out_size] as usize;
        let mut values = vec![0i32; total];
        let mut cursor = vec![0u32; out_size];
        for e in 0..in_size {
            let (off, len) = self.offsets_of(e);
            for &v in &self.values[off..off + len] {
                if v == OFF_RANK {
                    continue;
                }
                let t = v as usize;
                values[(offsets[t] + cursor[t]) as usize] = e as i32;
                cursor[t] += 1;
            }
        }

        Inverted {
            map: Map {
                name: format!("inverse_{}", self.name),
                in_set: self.out_set,
                out_set: self.in_set,
                in_size: self.out_size,
                out_size: self.in_size,
                values,
                storage: MapStorage::Ragged { offsets },
            },
            max_incidence: max_incidence as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_core::SetId;

    fn edge2node() -> Map {
        // 3-node ring: edges (0,1) (1,2) (2,0)
        Map::dense(
            "edge2node",
            SetId(0),
            3,
            SetId(1),
            3,
            vec![0, 1, 1, 2, 2, 0],
        )
        .unwrap()
    }

    #[test]
    fn inverts_a_ring() {
        let inv = edge2node().invert();
        assert_eq!(inv.map.name(), "inverse_edge2node");
        assert_eq!(inv.map.in_size(), 3);
        assert_eq!(inv.map.out_size(), 3);
        assert_eq!(inv.max_incidence, 2);
        // each node is touched by exactly two edges
        assert_eq!(inv.map.slice(0), &[0, 2]);
        assert_eq!(inv.map.slice(1), &[0, 1]);
        assert_eq!(inv.map.slice(2), &[1, 2]);
    }

    #[test]
    fn sentinel_entries_are_dropped() {
        let m = Map::dense(
            "m",
            SetId(0),
            2,
            SetId(1),
            2,
            vec![0, OFF_RANK, OFF_RANK, 1],
        )
        .unwrap();
        let inv = m.invert();
        assert_eq!(inv.map.len(), 2);
        assert_eq!(inv.map.slice(0), &[0]);
        assert_eq!(inv.map.slice(1), &[1]);
        assert!(inv.map.values().iter().all(|&v| v != OFF_RANK));
    }

    #[test]
    fn inverts_ragged_maps() {
        let m = Map::ragged(
            "n2e",
            SetId(0),
            3,
            SetId(1),
            2,
            vec![0, 1, 1, 0],
            vec![0, 2, 3, 4],
        )
        .unwrap();
        let inv = m.invert();
        assert_eq!(inv.map.slice(0), &[0, 2]);
        assert_eq!(inv.map.slice(1), &[0, 1]);
        assert_eq!(inv.max_incidence, 2);
    }

    #[test]
    fn unreferenced_target_gets_empty_slice() {
        let m = Map::dense("m", SetId(0), 2, SetId(1), 3, vec![0, 0]).unwrap();
        let inv = m.invert();
        assert_eq!(inv.map.slice(0), &[0, 1]);
        assert!(inv.map.slice(1).is_empty());
        assert!(inv.map.slice(2).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_dense_map() -> impl Strategy<Value = Map> {
            (1usize..8, 1usize..4, 1u32..10).prop_flat_map(|(in_size, arity, out_size)| {
                proptest::collection::vec(0..out_size as i32, in_size * arity).prop_map(
                    move |values| {
                        Map::dense("m", SetId(0), in_size as u32, SetId(1), out_size, values)
                            .unwrap()
                    },
                )
            })
        }

        proptest! {
            /// Double inversion preserves the adjacency relation of a
            /// sentinel-free map, independent of entry order.
            #[test]
            fn double_inversion_preserves_adjacency(m in arb_dense_map()) {
                let back = m.invert().map.invert().map;
                prop_assert_eq!(back.in_size(), m.in_size());
                prop_assert_eq!(back.out_size(), m.out_size());
                for e in 0..m.in_size() as usize {
                    let mut orig: Vec<i32> = m.slice(e).to_vec();
                    let mut round: Vec<i32> = back.slice(e).to_vec();
                    orig.sort_unstable();
                    round.sort_unstable();
                    prop_assert_eq!(orig, round);
                }
            }

            /// Every (source, target) pair of the original appears as
            /// (target, source) in the inverse, and fan-ins add up.
            #[test]
            fn inversion_is_the_reverse_relation(m in arb_dense_map()) {
                let inv = m.invert();
                prop_assert_eq!(inv.map.len(), m.len());
                for e in 0..m.in_size() as usize {
                    for &t in m.slice(e) {
                        prop_assert!(inv.map.slice(t as usize).contains(&(e as i32)));
                    }
                }
                let fan_in_max = (0..inv.map.in_size() as usize)
                    .map(|t| inv.map.slice(t).len())
                    .max()
                    .unwrap_or(0);
                prop_assert_eq!(inv.max_incidence, fan_in_max);
            }
        }
    }
}
