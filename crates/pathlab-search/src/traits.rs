use std::fmt::Debug;
use std::hash::Hash;

use pathlab_core::Coord;

/// Minimal graph interface: node membership and neighbor enumeration.
pub trait Graph {
    /// Node identifier. Must stay stable for the duration of one search.
    type Node: Copy + Eq + Hash + Debug;

    /// Whether `node` is a traversable node of this graph.
    fn contains(&self, node: Self::Node) -> bool;

    /// Append the neighbors of `node` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, node: Self::Node, buf: &mut Vec<Self::Node>);

    /// Total number of nodes; bounds path reconstruction.
    fn node_count(&self) -> usize;
}

/// Graph with non-negative edge costs.
pub trait WeightedGraph: Graph {
    /// Cost of moving from `from` to adjacent `to`. Must be >= 0.
    fn cost(&self, from: Self::Node, to: Self::Node) -> f64;
}

/// Graph whose nodes have a position, as needed by distance heuristics.
pub trait Spatial: Graph {
    /// Position of `node`, if known.
    fn coord(&self, node: Self::Node) -> Option<Coord>;
}
