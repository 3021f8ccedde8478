//! Small deterministic mesh builders.

use smallvec::SmallVec;

/// Edge→node values of an `n`-node ring, arity 2: edge `i` connects nodes
/// `i` and `(i + 1) % n`.
pub fn ring_edge2node(n: u32) -> Vec<i32> {
    (0..n)
        .flat_map(|i| [i as i32, ((i + 1) % n) as i32])
        .collect()
}

/// Identity values `0..n`, arity 1.
pub fn identity_values(n: u32) -> Vec<i32> {
    (0..n as i32).collect()
}

/// Node→edge CSR of an `n`-node ring: every node is incident to the edge
/// it starts and the edge that ends on it.
///
/// Returns `(values, offsets)` ready for a ragged map.
pub fn ring_node2edge(n: u32) -> (Vec<i32>, Vec<u32>) {
    let mut incident: Vec<SmallVec<[u32; 8]>> = vec![SmallVec::new(); n as usize];
    for e in 0..n {
        incident[e as usize].push(e);
        incident[((e + 1) % n) as usize].push(e);
    }
    let mut values = Vec::with_capacity(2 * n as usize);
    let mut offsets = Vec::with_capacity(n as usize + 1);
    offsets.push(0u32);
    for edges in &incident {
        values.extend(edges.iter().map(|&e| e as i32));
        offsets.push(values.len() as u32);
    }
    (values, offsets)
}
