//! Search outcome, result record and per-call configuration shared by all
//! algorithms.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{Endpoint, SearchError};
use crate::traits::Graph;

/// How a search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached and the path reconstructed.
    Found,
    /// The frontier ran dry: the goal is unreachable from the start.
    NoPath,
    /// An observer or cancel token requested a stop.
    Cancelled,
    /// [`SearchConfig::max_expansions`] was reached first.
    LimitReached,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Found => "found",
            Outcome::NoPath => "no path",
            Outcome::Cancelled => "cancelled",
            Outcome::LimitReached => "limit reached",
        })
    }
}

/// Result of one search call. Immutable once returned.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    pub outcome: Outcome,
    /// Start-to-goal path, both ends included. Empty unless `Found`.
    pub path: Vec<N>,
    /// Total edge cost of `path`; 0 unless `Found`.
    pub cost: f64,
    /// Nodes counted as visited, in the order they were visited. BFS and
    /// DFS count a node when it is discovered, Dijkstra and A* when it is
    /// finalized.
    pub visited: Vec<N>,
    /// Predecessor links recorded during the search.
    pub parents: HashMap<N, N>,
    /// Largest frontier size reached.
    pub frontier_peak: usize,
}

impl<N> SearchResult<N> {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        self.outcome == Outcome::Found
    }

    /// Number of visited nodes.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of nodes on the path.
    pub fn path_len(&self) -> usize {
        self.path.len()
    }
}

impl<N: Copy + Eq + Hash> SearchResult<N> {
    /// Result for `start == goal`: a one-node path of cost 0.
    pub(crate) fn trivial(start: N) -> Self {
        Self {
            outcome: Outcome::Found,
            path: vec![start],
            cost: 0.0,
            visited: vec![start],
            parents: HashMap::new(),
            frontier_peak: 0,
        }
    }

    /// Result without a path.
    pub(crate) fn unfinished(
        outcome: Outcome,
        visited: Vec<N>,
        parents: HashMap<N, N>,
        frontier_peak: usize,
    ) -> Self {
        Self {
            outcome,
            path: Vec::new(),
            cost: 0.0,
            visited,
            parents,
            frontier_peak,
        }
    }
}

/// Per-call search settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Stop with [`Outcome::LimitReached`] after this many expansions.
    /// `None` means unbounded; long searches then rely on cancellation.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Bound the number of expansions.
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    #[inline]
    pub(crate) fn exhausted(&self, expansions: usize) -> bool {
        self.max_expansions.is_some_and(|max| expansions >= max)
    }
}

/// Reject endpoints that are not nodes of `graph`.
pub(crate) fn check_endpoints<G: Graph + ?Sized>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
) -> Result<(), SearchError> {
    if !graph.contains(start) {
        return Err(SearchError::unknown(Endpoint::Start, start));
    }
    if !graph.contains(goal) {
        return Err(SearchError::unknown(Endpoint::Goal, goal));
    }
    Ok(())
}
