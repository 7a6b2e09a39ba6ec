use std::fmt;

use thiserror::Error;

/// Which end of a query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Start => "start",
            Endpoint::Goal => "goal",
        })
    }
}

/// A search call that could not produce an answer.
///
/// "No path" and "cancelled" are not errors; they are reported through
/// [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The start or goal is not a (traversable) node of the graph. Raised
    /// before any traversal work.
    #[error("{role} node {node} is not in the graph")]
    UnknownNode { role: Endpoint, node: String },
    /// The predecessor chain of `node` did not lead back to the start
    /// within `bound` links.
    #[error("predecessor chain from {node} does not reach the start within {bound} links")]
    Reconstruction { node: String, bound: usize },
}

impl SearchError {
    pub(crate) fn unknown<N: fmt::Debug>(role: Endpoint, node: N) -> Self {
        SearchError::UnknownNode {
            role,
            node: format!("{node:?}"),
        }
    }
}
