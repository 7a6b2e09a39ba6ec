//! Reachability flood fill.

use std::collections::HashSet;

use crate::traits::Graph;

/// Flood-fill from `start` and return every node connected to it, in
/// discovery order. Returns an empty vector if `start` is not in the graph.
pub fn reachable<G: Graph>(graph: &G, start: G::Node) -> Vec<G::Node> {
    let mut result = Vec::new();
    if !graph.contains(start) {
        return result;
    }

    let mut seen = HashSet::new();
    let mut stack = vec![start];
    let mut nbuf = Vec::new();
    seen.insert(start);
    result.push(start);

    while let Some(cur) = stack.pop() {
        nbuf.clear();
        graph.neighbors(cur, &mut nbuf);
        for &n in nbuf.iter() {
            if seen.insert(n) {
                stack.push(n);
                result.push(n);
            }
        }
    }
    result
}
