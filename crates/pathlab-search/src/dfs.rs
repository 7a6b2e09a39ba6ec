use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::bfs::finish;
use crate::error::SearchError;
use crate::instrument::Phases;
use crate::observer::{Flow, Observer, Step};
use crate::search::{Outcome, SearchConfig, SearchResult, check_endpoints};
use crate::traits::WeightedGraph;

/// A node on the explicit descent stack together with the neighbors it still
/// has to try.
struct Frame<N> {
    node: N,
    neighbors: Vec<N>,
    next: usize,
}

impl<N: Copy> Frame<N> {
    fn next_neighbor(&mut self) -> Option<N> {
        let n = self.neighbors.get(self.next).copied();
        self.next += 1;
        n
    }
}

/// Depth-first search from `start` to `goal`.
///
/// Descends into the first unseen neighbor of the deepest node and
/// backtracks when a node has none left. The returned path is valid but
/// generally not shortest. A node counts as visited when it is first entered.
///
/// The descent stack is explicit, so depth is bounded by memory rather than
/// by the call stack.
pub fn dfs<G, O>(graph: &G, start: G::Node, goal: G::Node, observer: O) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    O: Observer<G::Node>,
{
    dfs_with(graph, start, goal, observer, &SearchConfig::default(), &mut Phases::default())
}

/// [`dfs`] with an explicit configuration, recording phase timings into
/// `phases`.
pub fn dfs_with<G, O>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    mut observer: O,
    config: &SearchConfig,
    phases: &mut Phases,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    O: Observer<G::Node>,
{
    let t = Instant::now();
    check_endpoints(graph, start, goal)?;
    log::debug!("dfs: {start:?} -> {goal:?}");
    if start == goal {
        phases.setup = t.elapsed();
        return Ok(SearchResult::trivial(start));
    }

    let enter = |node| {
        let mut neighbors = Vec::new();
        graph.neighbors(node, &mut neighbors);
        Frame {
            node,
            neighbors,
            next: 0,
        }
    };
    let mut stack = vec![enter(start)];
    let mut seen = HashSet::from([start]);
    let mut visited = vec![start];
    let mut parents = HashMap::new();
    let mut peak = 1;
    let mut expansions = 1;
    phases.setup = t.elapsed();

    let t = Instant::now();
    let outcome = 'search: loop {
        let Some(top) = stack.last_mut() else {
            break 'search Outcome::NoPath;
        };
        let cur = top.node;

        let mut child = None;
        while let Some(n) = top.next_neighbor() {
            if !seen.contains(&n) {
                child = Some(n);
                break;
            }
        }

        let flow = match child {
            Some(n) => {
                if config.exhausted(expansions) {
                    break 'search Outcome::LimitReached;
                }
                expansions += 1;
                seen.insert(n);
                parents.insert(n, cur);
                visited.push(n);
                if n == goal {
                    break 'search Outcome::Found;
                }
                stack.push(enter(n));
                peak = peak.max(stack.len());
                log::trace!("dfs: {cur:?} -> {n:?}, depth {}", stack.len());
                observer.on_step(&Step {
                    current: cur,
                    opened: &[n],
                    closed: None,
                })
            }
            None => {
                stack.pop();
                log::trace!("dfs: backtrack from {cur:?}");
                observer.on_step(&Step {
                    current: cur,
                    opened: &[],
                    closed: (cur != start).then_some(cur),
                })
            }
        };
        if flow == Flow::Cancel {
            break 'search Outcome::Cancelled;
        }
    };
    phases.traversal = t.elapsed();

    finish("dfs", graph, start, goal, outcome, visited, parents, peak, phases)
}
