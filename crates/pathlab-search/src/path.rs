//! Path reconstruction from predecessor links.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;
use crate::traits::WeightedGraph;

/// Walk predecessor links back from `goal` to `start` and return the path in
/// start-to-goal order.
///
/// A valid path has at most `bound` nodes (pass the graph's node count). A
/// chain that breaks off, or that is still going after `bound` nodes, means
/// the predecessor map is corrupt and yields [`SearchError::Reconstruction`].
pub fn reconstruct<N>(parents: &HashMap<N, N>, start: N, goal: N, bound: usize) -> Result<Vec<N>, SearchError>
where
    N: Copy + Eq + Hash + Debug,
{
    let fail = || SearchError::Reconstruction {
        node: format!("{goal:?}"),
        bound,
    };

    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        if path.len() >= bound {
            return Err(fail());
        }
        cur = *parents.get(&cur).ok_or_else(fail)?;
        path.push(cur);
    }
    path.reverse();
    Ok(path)
}

/// Sum of edge costs along `path`.
pub fn path_cost<G: WeightedGraph + ?Sized>(graph: &G, path: &[G::Node]) -> f64 {
    path.windows(2).map(|w| graph.cost(w[0], w[1])).sum()
}
