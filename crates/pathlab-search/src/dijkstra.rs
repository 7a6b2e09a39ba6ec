use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::bfs::finish;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::instrument::Phases;
use crate::observer::{Flow, Observer, Step};
use crate::search::{Outcome, SearchConfig, SearchResult, check_endpoints};
use crate::traits::WeightedGraph;

/// Dijkstra's algorithm from `start` to `goal`.
///
/// Returns a minimum-cost path for non-negative edge costs. A node counts as
/// visited when it is popped with its best cost and finalized; the goal is
/// counted too.
pub fn dijkstra<G, O>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    observer: O,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    O: Observer<G::Node>,
{
    dijkstra_with(graph, start, goal, observer, &SearchConfig::default(), &mut Phases::default())
}

/// [`dijkstra`] with an explicit configuration, recording phase timings into
/// `phases`.
pub fn dijkstra_with<G, O>(
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
    log::debug!("dijkstra: {start:?} -> {goal:?}");
    if start == goal {
        phases.setup = t.elapsed();
        return Ok(SearchResult::trivial(start));
    }

    let mut dist = HashMap::from([(start, 0.0)]);
    let mut closed = HashSet::new();
    let mut visited = Vec::new();
    let mut parents = HashMap::new();
    let mut open: Frontier<G::Node> = Frontier::new();
    open.push(0.0, start);
    let mut nbuf = Vec::new();
    let mut opened = Vec::new();
    let mut expansions = 0;
    phases.setup = t.elapsed();

    let t = Instant::now();
    let outcome = 'search: loop {
        let Some((d, cur)) = open.pop_min() else {
            break 'search Outcome::NoPath;
        };

        // Skip stale entries.
        if closed.contains(&cur) || dist.get(&cur).is_some_and(|&best| d > best) {
            continue;
        }
        closed.insert(cur);
        visited.push(cur);

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
            if closed.contains(&n) {
                continue;
            }
            let nd = d + graph.cost(cur, n);
            if dist.get(&n).is_none_or(|&best| nd < best) {
                dist.insert(n, nd);
                parents.insert(n, cur);
                open.push(nd, n);
                opened.push(n);
            }
        }
        log::trace!("dijkstra: finalized {cur:?} at {d}, {} opened", opened.len());

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

    finish("dijkstra", graph, start, goal, outcome, visited, parents, open.peak_len(), phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;
    use crate::observer::CancelToken;
    use pathlab_core::{GridMap, Point};

    fn diamond() -> Network {
        // 1 -> 2 -> 4 costs 2, 1 -> 3 -> 4 costs 5, 1 -> 4 costs 7.
        let mut net = Network::new();
        for id in 1..=4 {
            net.add_node(id);
        }
        net.add_edge(1, 4, Some(7.0)).unwrap();
        net.add_edge(1, 3, Some(1.0)).unwrap();
        net.add_edge(3, 4, Some(4.0)).unwrap();
        net.add_edge(1, 2, Some(1.0)).unwrap();
        net.add_edge(2, 4, Some(1.0)).unwrap();
        net
    }

    #[test]
    fn cheapest_path_wins() {
        let r = dijkstra(&diamond(), 1, 4, ()).unwrap();
        assert_eq!(r.path, vec![1, 2, 4]);
        assert_eq!(r.cost, 2.0);
        assert_eq!(r.parents.get(&4), Some(&2));
    }

    #[test]
    fn open_grid_visits_everything_closer_than_goal() {
        let grid = GridMap::new(5, 5);
        let r = dijkstra(&grid, Point::new(0, 0), Point::new(4, 4), ()).unwrap();
        assert_eq!(r.cost, 8.0);
        assert_eq!(r.path.len(), 9);
        assert_eq!(r.visited_count(), 25);
        assert_eq!(r.visited.last(), Some(&Point::new(4, 4)));
    }

    #[test]
    fn zero_cost_edges() {
        let mut net = Network::new();
        for id in 0..3 {
            net.add_node(id);
        }
        net.add_edge(0, 1, Some(0.0)).unwrap();
        net.add_edge(1, 2, Some(0.0)).unwrap();
        let r = dijkstra(&net, 0, 2, ()).unwrap();
        assert_eq!(r.path, vec![0, 1, 2]);
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn directed_edges_are_respected() {
        let r = dijkstra(&diamond(), 4, 1, ()).unwrap();
        assert_eq!(r.outcome, Outcome::NoPath);
        assert_eq!(r.visited, vec![4]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let grid = GridMap::new(6, 4);
        let a = dijkstra(&grid, Point::new(0, 3), Point::new(5, 0), ()).unwrap();
        let b = dijkstra(&grid, Point::new(0, 3), Point::new(5, 0), ()).unwrap();
        assert_eq!(a.path, b.path);
        assert_eq!(a.visited, b.visited);
    }

    #[test]
    fn pre_cancelled_token() {
        let token = CancelToken::new();
        token.cancel();
        let grid = GridMap::new(5, 5);
        let r = dijkstra(&grid, Point::new(0, 0), Point::new(4, 4), token).unwrap();
        assert_eq!(r.outcome, Outcome::Cancelled);
        assert_eq!(r.visited_count(), 1);
        assert!(r.path.is_empty());
    }
}
