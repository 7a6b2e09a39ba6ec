use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Instant;

use crate::error::SearchError;
use crate::instrument::Phases;
use crate::observer::{Flow, Observer, Step};
use crate::path::{path_cost, reconstruct};
use crate::search::{Outcome, SearchConfig, SearchResult, check_endpoints};
use crate::traits::WeightedGraph;

/// Breadth-first search from `start` to `goal`.
///
/// Finds a path with the fewest edges; edge costs only contribute to the
/// reported cost. A node counts as visited when it is first discovered.
pub fn bfs<G, O>(graph: &G, start: G::Node, goal: G::Node, observer: O) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    O: Observer<G::Node>,
{
    bfs_with(graph, start, goal, observer, &SearchConfig::default(), &mut Phases::default())
}

/// [`bfs`] with an explicit configuration, recording phase timings into
/// `phases`.
pub fn bfs_with<G, O>(
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
    log::debug!("bfs: {start:?} -> {goal:?}");
    if start == goal {
        phases.setup = t.elapsed();
        return Ok(SearchResult::trivial(start));
    }

    let mut queue = VecDeque::from([start]);
    let mut seen = HashSet::from([start]);
    let mut visited = vec![start];
    let mut parents = HashMap::new();
    let mut nbuf = Vec::new();
    let mut opened = Vec::new();
    let mut peak = 1;
    let mut expansions = 0;
    phases.setup = t.elapsed();

    let t = Instant::now();
    let outcome = 'search: loop {
        let Some(cur) = queue.pop_front() else {
            break 'search Outcome::NoPath;
        };
        if cur == goal {
            break 'search Outcome::Found;
        }
        if config.exhausted(expansions) {
            break 'search Outcome::LimitReached;
        }
        expansions += 1;

        nbuf.clear();
        graph.neighbors(cur, &mut nbuf);
        opened.clear();
        for &n in &nbuf {
            if seen.insert(n) {
                parents.insert(n, cur);
                visited.push(n);
                queue.push_back(n);
                opened.push(n);
            }
        }
        peak = peak.max(queue.len());
        log::trace!("bfs: expanded {cur:?}, {} opened", opened.len());

        let step = Step {
            current: cur,
            opened: &opened,
            closed: (cur != start).then_some(cur),
        };
        if observer.on_step(&step) == Flow::Cancel {
            break 'search Outcome::Cancelled;
        }
    };
    phases.traversal = t.elapsed();

    finish("bfs", graph, start, goal, outcome, visited, parents, peak, phases)
}

/// Shared tail of every algorithm: reconstruct on success, otherwise return
/// the partial exploration record.
#[allow(clippy::too_many_arguments)]
pub(crate) fn finish<G>(
    name: &str,
    graph: &G,
    start: G::Node,
    goal: G::Node,
    outcome: Outcome,
    visited: Vec<G::Node>,
    parents: HashMap<G::Node, G::Node>,
    frontier_peak: usize,
    phases: &mut Phases,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
{
    if outcome != Outcome::Found {
        match outcome {
            Outcome::Cancelled => log::warn!("{name}: cancelled after {} visited", visited.len()),
            _ => log::debug!("{name}: {outcome} after {} visited", visited.len()),
        }
        return Ok(SearchResult::unfinished(outcome, visited, parents, frontier_peak));
    }

    let t = Instant::now();
    let path = reconstruct(&parents, start, goal, graph.node_count()).inspect_err(|e| log::warn!("{name}: {e}"))?;
    let cost = path_cost(graph, &path);
    phases.reconstruction = t.elapsed();
    log::debug!(
        "{name}: found path of {} nodes, cost {cost}, {} visited",
        path.len(),
        visited.len()
    );

    Ok(SearchResult {
        outcome,
        path,
        cost,
        visited,
        parents,
        frontier_peak,
    })
}
