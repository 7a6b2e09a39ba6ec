use std::fmt;

use crate::astar::astar_with;
use crate::bfs::bfs_with;
use crate::dfs::dfs_with;
use crate::dijkstra::dijkstra_with;
use crate::error::SearchError;
use crate::heuristic::{GeoManhattan, HeuristicKind};
use crate::instrument::Phases;
use crate::observer::Observer;
use crate::search::{SearchConfig, SearchResult};
use crate::traits::{Spatial, WeightedGraph};

/// A search algorithm chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    AStar(HeuristicKind),
}

impl Algorithm {
    /// The line-up compared on grids.
    pub const GRID: [Algorithm; 5] = [
        Algorithm::Dijkstra,
        Algorithm::AStar(HeuristicKind::Manhattan),
        Algorithm::AStar(HeuristicKind::Euclidean),
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// The line-up compared on geographic networks.
    pub const GEO: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar(HeuristicKind::GreatCircle),
        Algorithm::AStar(HeuristicKind::GeoManhattan {
            inflation: GeoManhattan::DEFAULT_INFLATION,
        }),
        Algorithm::Bfs,
    ];

    /// Whether the algorithm weighs edges when choosing a path.
    pub fn is_cost_aware(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar(_))
    }

    /// Run the algorithm with default configuration.
    pub fn run<G, O>(self, graph: &G, start: G::Node, goal: G::Node, observer: O) -> Result<SearchResult<G::Node>, SearchError>
    where
        G: WeightedGraph + Spatial + ?Sized,
        O: Observer<G::Node>,
    {
        self.run_with(graph, start, goal, observer, &SearchConfig::default(), &mut Phases::default())
    }

    /// Run the algorithm with an explicit configuration, recording phase
    /// timings into `phases`.
    pub fn run_with<G, O>(
        self,
        graph: &G,
        start: G::Node,
        goal: G::Node,
        observer: O,
        config: &SearchConfig,
        phases: &mut Phases,
    ) -> Result<SearchResult<G::Node>, SearchError>
    where
        G: WeightedGraph + Spatial + ?Sized,
        O: Observer<G::Node>,
    {
        match self {
            Algorithm::Bfs => bfs_with(graph, start, goal, observer, config, phases),
            Algorithm::Dfs => dfs_with(graph, start, goal, observer, config, phases),
            Algorithm::Dijkstra => dijkstra_with(graph, start, goal, observer, config, phases),
            Algorithm::AStar(h) => astar_with(graph, start, goal, h, observer, config, phases),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => f.write_str("BFS"),
            Algorithm::Dfs => f.write_str("DFS"),
            Algorithm::Dijkstra => f.write_str("Dijkstra"),
            Algorithm::AStar(h) => write!(f, "A* ({h})"),
        }
    }
}
