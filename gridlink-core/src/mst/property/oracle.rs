//! Exhaustive spanning forest oracle for small graphs.

use crate::graph::GridEdge;

/// Largest candidate list the oracle will enumerate.
pub(super) const MAX_ORACLE_EDGES: usize = 12;

/// Path-compressing find over a plain parent array.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Counts connected components when every link in `edges` is present.
pub(super) fn component_count(node_count: usize, edges: &[GridEdge]) -> usize {
    let mut parent: Vec<usize> = (0..node_count).collect();
    let mut components = node_count;
    for edge in edges {
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left != right {
            parent[right] = left;
            components -= 1;
        }
    }
    components
}

/// Returns the cheapest total weight over all spanning forests.
///
/// A subset qualifies when it is acyclic and connects the same components
/// as the full candidate list, i.e. it holds `node_count - components`
/// links without forming a cycle.
pub(super) fn brute_force_minimum(node_count: usize, edges: &[GridEdge]) -> u64 {
    assert!(
        edges.len() <= MAX_ORACLE_EDGES,
        "oracle only enumerates small graphs"
    );
    let wanted = node_count - component_count(node_count, edges);
    let mut best = u64::MAX;

    for mask in 0_u32..(1_u32 << edges.len()) {
        if mask.count_ones() as usize != wanted {
            continue;
        }
        let mut parent: Vec<usize> = (0..node_count).collect();
        let mut weight = 0_u64;
        let mut acyclic = true;
        for (index, edge) in edges.iter().enumerate() {
            if mask & (1 << index) == 0 {
                continue;
            }
            let left = find_root(&mut parent, edge.source());
            let right = find_root(&mut parent, edge.target());
            if left == right {
                acyclic = false;
                break;
            }
            parent[right] = left;
            weight += u64::from(edge.weight());
        }
        if acyclic {
            best = best.min(weight);
        }
    }
    best
}
