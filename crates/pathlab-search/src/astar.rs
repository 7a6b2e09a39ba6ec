use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::bfs::finish;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::Heuristic;
use crate::instrument::Phases;
use crate::observer::{Flow, Observer, Step};
use crate::search::{Outcome, SearchConfig, SearchResult, check_endpoints};
use crate::traits::WeightedGraph;

/// A* search from `start` to `goal`, guided by `heuristic`.
///
/// The frontier is ordered by `f = g + h`; among equal `f` the node with the
/// smaller `h` (closer to the goal) comes first, then insertion order. With
/// an admissible heuristic the path is a minimum-cost path. A finalized node
/// reached again by a cheaper path is reopened, so the heuristic need not be
/// consistent. Visited nodes are counted once, on first finalization.
pub fn astar<G, H, O>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: H,
    observer: O,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    H: Heuristic<G>,
    O: Observer<G::Node>,
{
    astar_with(
        graph,
        start,
        goal,
        heuristic,
        observer,
        &SearchConfig::default(),
        &mut Phases::default(),
    )
}

/// [`astar`] with an explicit configuration, recording phase timings into
/// `phases`.
pub fn astar_with<G, H, O>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    heuristic: H,
    mut observer: O,
    config: &SearchConfig,
    phases: &mut Phases,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: WeightedGraph + ?Sized,
    H: Heuristic<G>,
    O: Observer<G::Node>,
{
    let t = Instant::now();
    check_endpoints(graph, start, goal)?;
    log::debug!("astar: {start:?} -> {goal:?}");
    if start == goal {
        phases.setup = t.elapsed();
        return Ok(SearchResult::trivial(start));
    }

    // Estimates are computed once per discovered node.
    let mut estimates: HashMap<G::Node, f64> = HashMap::new();
    let mut estimate = |n: G::Node| *estimates.entry(n).or_insert_with(|| heuristic.estimate(graph, n, goal));

    let mut dist = HashMap::from([(start, 0.0)]);
    let mut closed = HashSet::new();
    let mut expanded = HashSet::new();
    let mut visited = Vec::new();
    let mut parents = HashMap::new();
    let mut open: Frontier<G::Node, (f64, f64)> = Frontier::new();
    let h = estimate(start);
    open.push((h, h), start);
    let mut nbuf = Vec::new();
    let mut opened = Vec::new();
    let mut expansions = 0;
    phases.setup = t.elapsed();

    let t = Instant::now();
    let outcome = 'search: loop {
        let Some(((f, h), cur)) = open.pop_min() else {
            break 'search Outcome::NoPath;
        };

        let Some(&g) = dist.get(&cur) else {
            continue;
        };
        // Skip stale entries.
        if closed.contains(&cur) || f > g + h {
            continue;
        }
        closed.insert(cur);
        if expanded.insert(cur) {
            visited.push(cur);
        }

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
            let ng = g + graph.cost(cur, n);
            if dist.get(&n).is_none_or(|&best| ng < best) {
                dist.insert(n, ng);
                parents.insert(n, cur);
                if closed.remove(&n) {
                    log::trace!("astar: reopened {n:?} at g={ng}");
                }
                let nh = estimate(n);
                open.push((ng + nh, nh), n);
                opened.push(n);
            }
        }
        log::trace!("astar: finalized {cur:?} at g={g} f={f}, {} opened", opened.len());

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

    finish("astar", graph, start, goal, outcome, visited, parents, open.peak_len(), phases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::dijkstra;
    use crate::heuristic::{Euclidean, Manhattan, Zero, from_fn};
    use crate::network::Network;
    use pathlab_core::{Coord, GridMap, Point};

    #[test]
    fn manhattan_on_open_grid_walks_straight_in() {
        let grid = GridMap::new(5, 5);
        let r = astar(&grid, Point::new(0, 0), Point::new(4, 4), Manhattan, ()).unwrap();
        assert_eq!(r.cost, 8.0);
        assert_eq!(r.path.len(), 9);
        assert_eq!(r.visited_count(), 9);
    }

    #[test]
    fn zero_heuristic_matches_dijkstra() {
        let grid = GridMap::from_ascii(
            "
            S...#....
            .##.#.##.
            .#..#..#.
            .#.###.#.
            ...#...#G
            ",
        )
        .unwrap();
        let (s, g) = (grid.start().unwrap(), grid.goal().unwrap());
        let a = astar(&grid, s, g, Zero, ()).unwrap();
        let d = dijkstra(&grid, s, g, ()).unwrap();
        assert_eq!(a.outcome, d.outcome);
        assert_eq!(a.cost, d.cost);
    }

    #[test]
    fn walls_force_a_detour() {
        let grid = GridMap::from_ascii(
            "
            S.#..
            ..#..
            ....G
            ",
        )
        .unwrap();
        let (s, g) = (grid.start().unwrap(), grid.goal().unwrap());
        let r = astar(&grid, s, g, Euclidean, ()).unwrap();
        assert_eq!(r.cost, 6.0);
        assert!(r.path.iter().all(|&p| !grid.is_obstacle(p)));
    }

    #[test]
    fn closure_heuristic_on_network() {
        let mut net = Network::new();
        for id in 0..4 {
            net.add_node_at(id, Coord::new(id as f64, 0.0));
        }
        net.add_undirected_edge(0, 1, Some(1.0)).unwrap();
        net.add_undirected_edge(1, 2, Some(1.0)).unwrap();
        net.add_undirected_edge(2, 3, Some(1.0)).unwrap();
        net.add_undirected_edge(0, 3, Some(5.0)).unwrap();
        let h = from_fn(|a: u64, b: u64| a.abs_diff(b) as f64);
        let r = astar(&net, 0, 3, h, ()).unwrap();
        assert_eq!(r.path, vec![0, 1, 2, 3]);
        assert_eq!(r.cost, 3.0);
    }

    #[test]
    fn inconsistent_heuristic_reopens_closed_nodes() {
        let mut net = Network::new();
        for id in 0..4 {
            net.add_node(id);
        }
        net.add_edge(0, 1, Some(1.0)).unwrap();
        net.add_edge(0, 2, Some(3.0)).unwrap();
        net.add_edge(1, 2, Some(1.0)).unwrap();
        net.add_edge(2, 3, Some(3.0)).unwrap();
        // Admissible (true cost from 1 is 4) but not consistent across 0 -> 1.
        let h = from_fn(|n: u64, _goal: u64| if n == 1 { 4.0 } else { 0.0 });
        let a = astar(&net, 0, 3, h, ()).unwrap();
        let d = dijkstra(&net, 0, 3, ()).unwrap();
        assert_eq!(a.cost, d.cost);
        assert_eq!(a.cost, 5.0);
        assert_eq!(a.path, vec![0, 1, 2, 3]);
        // Node 2 is finalized twice but counted once.
        assert_eq!(a.visited, vec![0, 2, 1, 3]);
    }

    #[test]
    fn limit_is_reported() {
        let grid = GridMap::new(8, 8);
        let config = SearchConfig::default().with_max_expansions(2);
        let r = astar_with(
            &grid,
            Point::new(0, 0),
            Point::new(7, 7),
            Manhattan,
            (),
            &config,
            &mut Phases::default(),
        )
        .unwrap();
        assert_eq!(r.outcome, Outcome::LimitReached);
        assert_eq!(r.visited_count(), 3);
    }
}
