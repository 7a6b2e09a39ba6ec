//! Path-search engine over grids and weighted graphs.
//!
//! This crate provides the classic single-pair search algorithms behind one
//! calling convention, `search(graph, start, goal, observer)`:
//!
//! - **BFS** fewest-edge paths ([`bfs`])
//! - **DFS** depth-first exploration with an explicit stack ([`dfs`])
//! - **Dijkstra** minimum-cost paths ([`dijkstra`])
//! - **A\*** heuristic-guided minimum-cost paths ([`astar`]) with
//!   interchangeable [`Heuristic`]s
//!
//! Every call owns its bookkeeping, reports progress to an [`Observer`] after
//! each expansion (which may cancel it), and returns a [`SearchResult`] with
//! the path, its cost and the visited nodes. [`measure`] and [`compare`] wrap
//! calls with phase timings and peak memory into a [`Report`].
//!
//! Graphs are supplied through traits; [`GridMap`](pathlab_core::GridMap)
//! and [`Network`] implement all of them.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Graph`] | reachability |
//! | [`WeightedGraph`] : [`Graph`] | BFS, DFS, Dijkstra, A* with a generic heuristic |
//! | [`Spatial`] : [`Graph`] | coordinate heuristics, [`Algorithm`] dispatch |

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod error;
mod frontier;
mod grid;
pub mod heuristic;
mod instrument;
mod network;
mod observer;
mod path;
mod reach;
mod search;
mod traits;

pub use algorithm::Algorithm;
pub use astar::{astar, astar_with};
pub use bfs::{bfs, bfs_with};
pub use dfs::{dfs, dfs_with};
pub use dijkstra::{dijkstra, dijkstra_with};
pub use error::{Endpoint, SearchError};
pub use frontier::Frontier;
pub use grid::paint_step;
pub use heuristic::{Heuristic, HeuristicKind};
pub use instrument::{MemoryProbe, NoProbe, Phases, Report, TrackingAllocator, compare, measure, measure_algorithm};
pub use network::{Network, NetworkError};
pub use observer::{CancelToken, Flow, FnObserver, Observer, OwnedStep, Recorder, Step, WithCancel, observe_fn};
pub use path::{path_cost, reconstruct};
pub use reach::reachable;
pub use search::{Outcome, SearchConfig, SearchResult};
pub use traits::{Graph, Spatial, WeightedGraph};
