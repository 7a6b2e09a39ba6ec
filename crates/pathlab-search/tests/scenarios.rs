//! Worked scenarios: the canonical 5x5 query, disconnected graphs, invalid
//! endpoints and cancellation.

use pathlab_core::{GridMap, Label, Point};
use pathlab_search::heuristic::{IdDistance, Manhattan};
use pathlab_search::{
    Algorithm, CancelToken, Endpoint, Flow, HeuristicKind, Network, NoProbe, Observer, Outcome, Recorder, SearchError,
    Step, astar, bfs, compare, dfs, dijkstra, observe_fn, paint_step,
};

#[test]
fn five_by_five_open_grid() {
    let grid = GridMap::new(5, 5);
    let (s, g) = (Point::new(0, 0), Point::new(4, 4));

    let b = bfs(&grid, s, g, ()).unwrap();
    assert_eq!(b.path.len(), 9);
    assert_eq!(b.cost, 8.0);

    let d = dijkstra(&grid, s, g, ()).unwrap();
    let a = astar(&grid, s, g, Manhattan, ()).unwrap();
    assert_eq!(d.cost, 8.0);
    assert_eq!(a.cost, 8.0);
    assert!(a.visited_count() < d.visited_count());
}

#[test]
fn start_equals_goal() {
    let grid = GridMap::new(3, 3);
    let p = Point::new(1, 1);
    for alg in Algorithm::GRID {
        let mut rec = Recorder::new();
        let r = alg.run(&grid, p, p, &mut rec).unwrap();
        assert_eq!(r.outcome, Outcome::Found, "{alg}");
        assert_eq!(r.path, vec![p], "{alg}");
        assert_eq!(r.cost, 0.0, "{alg}");
        assert!(rec.steps.is_empty(), "{alg}");
    }
}

fn two_islands() -> Network {
    // A = {1, 2, 3, 4}, B = {10, 11}.
    let mut net = Network::new();
    for id in [1, 2, 3, 4, 10, 11] {
        net.add_node(id);
    }
    net.add_undirected_edge(1, 2, Some(2.0)).unwrap();
    net.add_undirected_edge(2, 3, Some(1.0)).unwrap();
    net.add_undirected_edge(3, 4, Some(3.0)).unwrap();
    net.add_undirected_edge(1, 4, Some(1.0)).unwrap();
    net.add_undirected_edge(10, 11, None).unwrap();
    net
}

#[test]
fn disconnected_goal_visits_whole_component() {
    let net = two_islands();
    for alg in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::AStar(HeuristicKind::Euclidean),
    ] {
        let r = alg.run(&net, 1, 11, ()).unwrap();
        assert_eq!(r.outcome, Outcome::NoPath, "{alg}");
        assert!(r.path.is_empty(), "{alg}");
        assert_eq!(r.cost, 0.0, "{alg}");
        assert_eq!(r.visited_count(), 4, "{alg}");
    }
    let r = astar(&net, 1, 11, IdDistance, ()).unwrap();
    assert_eq!(r.visited_count(), 4);
}

#[test]
fn invalid_endpoints() {
    let net = two_islands();
    assert_eq!(
        dijkstra(&net, 99, 1, ()).unwrap_err(),
        SearchError::UnknownNode {
            role: Endpoint::Start,
            node: "99".into()
        }
    );
    assert_eq!(
        bfs(&net, 1, 98, ()).unwrap_err(),
        SearchError::UnknownNode {
            role: Endpoint::Goal,
            node: "98".into()
        }
    );

    let grid = GridMap::from_ascii(
        "
        S#
        .G
        ",
    )
    .unwrap();
    assert!(dfs(&grid, Point::new(1, 0), Point::new(1, 1), ()).is_err());
    assert!(astar(&grid, Point::new(0, 0), Point::new(5, 5), Manhattan, ()).is_err());
}

#[test]
fn observer_cancels_every_algorithm() {
    let grid = GridMap::new(20, 20);
    let (s, g) = (Point::new(0, 0), Point::new(19, 19));
    for alg in Algorithm::GRID {
        let mut calls = 0;
        let r = alg
            .run(
                &grid,
                s,
                g,
                observe_fn(|_: &Step<'_, Point>| {
                    calls += 1;
                    if calls == 5 { Flow::Cancel } else { Flow::Continue }
                }),
            )
            .unwrap();
        assert_eq!(r.outcome, Outcome::Cancelled, "{alg}");
        assert!(r.path.is_empty(), "{alg}");
        assert_eq!(calls, 5, "{alg}");
    }
}

#[test]
fn token_cancels_from_another_thread() {
    let grid = GridMap::new(200, 200);
    let token = CancelToken::new();
    let trigger = token.clone();
    let mut seen = 0;
    let observer = observe_fn(|_: &Step<'_, Point>| {
        seen += 1;
        if seen == 10 {
            std::thread::scope(|scope| {
                scope.spawn(|| trigger.cancel());
            });
        }
        Flow::Continue
    })
    .with_cancel(token);
    let r = dijkstra(&grid, Point::new(0, 0), Point::new(199, 199), observer).unwrap();
    assert_eq!(r.outcome, Outcome::Cancelled);
    assert_eq!(seen, 10);
}

#[test]
fn replaying_steps_paints_the_grid() {
    let mut grid = GridMap::from_ascii(
        "
        S....
        .###.
        ....G
        ",
    )
    .unwrap();
    let (s, g) = (grid.start().unwrap(), grid.goal().unwrap());
    let mut rec = Recorder::new();
    let r = astar(&grid, s, g, Manhattan, &mut rec).unwrap();
    assert!(r.is_found());

    for step in &rec.steps {
        let step = Step {
            current: step.current,
            opened: &step.opened,
            closed: step.closed,
        };
        paint_step(&mut grid, &step);
    }
    grid.mark_path(&r.path);

    assert_eq!(grid.at(s), Some(Label::Start));
    assert_eq!(grid.at(g), Some(Label::Goal));
    assert_eq!(grid.count(Label::Obstacle), 3);
    assert_eq!(grid.count(Label::Path), r.path.len() - 2);
}

#[test]
fn compare_all_on_a_grid() {
    let grid = GridMap::new(5, 5);
    let reports = compare(&grid, Point::new(0, 0), Point::new(4, 4), &Algorithm::GRID, &NoProbe).unwrap();
    assert_eq!(reports.len(), 5);
    for report in &reports {
        assert_eq!(report.outcome, Outcome::Found);
        assert!(report.to_string().starts_with(&report.algorithm));
    }
}

#[test]
fn observer_by_mutable_reference_keeps_state() {
    struct Counter(usize);
    impl Observer<u64> for Counter {
        fn on_step(&mut self, _step: &Step<'_, u64>) -> Flow {
            self.0 += 1;
            Flow::Continue
        }
    }

    let net = two_islands();
    let mut counter = Counter(0);
    let r = dijkstra(&net, 1, 3, &mut counter).unwrap();
    assert_eq!(r.path, vec![1, 2, 3]);
    assert_eq!(r.cost, 3.0);
    assert!(counter.0 >= 2);
}
