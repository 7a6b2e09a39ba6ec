//! Scenario generation and text rendering shared by the demo binary.

use std::fmt::Write;

use crossterm::style::{Color, Stylize, style};
use pathlab_core::{GridMap, Label, Point};
use pathlab_search::{Algorithm, HeuristicKind, OwnedStep, Report, Step, paint_step};
use rand::{Rng, RngExt};

/// Line-up compared in graph mode. The coordinate heuristics read the
/// positions `Network::random_connected` assigns.
pub const GRAPH_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::Dijkstra,
    Algorithm::AStar(HeuristicKind::Zero),
    Algorithm::AStar(HeuristicKind::Euclidean),
    Algorithm::AStar(HeuristicKind::Manhattan),
    Algorithm::Bfs,
    Algorithm::Dfs,
];

/// Random grid with the start in the top-left corner and the goal in the
/// bottom-right one. Every other cell is blocked with probability `density`.
pub fn random_grid<R: Rng>(width: i32, height: i32, density: f64, rng: &mut R) -> GridMap {
    let (width, height) = (width.max(2), height.max(2));
    let mut grid = GridMap::new(width, height);
    grid.set_start(Point::new(0, 0));
    grid.set_goal(Point::new(width - 1, height - 1));
    let density = density.clamp(0.0, 1.0);
    for p in grid.bounds() {
        if rng.random_range(0.0..1.0) < density {
            grid.set_obstacle(p);
        }
    }
    grid
}

/// Paint recorded exploration steps, then the final path, onto `grid`.
pub fn replay(grid: &mut GridMap, steps: &[OwnedStep<Point>], path: &[Point]) {
    grid.clear_search_marks();
    for s in steps {
        let step = Step {
            current: s.current,
            opened: &s.opened,
            closed: s.closed,
        };
        paint_step(grid, &step);
    }
    grid.mark_path(path);
}

fn color_of(label: Label) -> Color {
    match label {
        Label::Empty => Color::DarkGrey,
        Label::Obstacle => Color::White,
        Label::Start => Color::Green,
        Label::Goal => Color::Red,
        Label::Open => Color::Cyan,
        Label::Closed => Color::Blue,
        Label::Path => Color::Yellow,
    }
}

/// Text form of `grid`, optionally with terminal colors.
pub fn render(grid: &GridMap, color: bool) -> String {
    if !color {
        return grid.to_ascii();
    }
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let label = grid.at(Point::new(x, y)).unwrap_or_default();
            let _ = write!(out, "{}", style(label.glyph()).with(color_of(label)));
        }
        out.push('\n');
    }
    out
}

/// Tabulate reports, one row per algorithm.
pub fn report_table(reports: &[Report]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} | {:>13} | {:>10} | {:>10} | {:>8} | {:>6} | {:>10}",
        "Algorithm", "Outcome", "Time (ms)", "Mem (KB)", "Visited", "Path", "Cost"
    );
    let _ = writeln!(out, "{}", "-".repeat(99));
    for r in reports {
        let _ = writeln!(
            out,
            "{:<24} | {:>13} | {:>10.3} | {:>10.1} | {:>8} | {:>6} | {:>10.1}",
            r.algorithm,
            r.outcome.to_string(),
            r.elapsed.as_secs_f64() * 1000.0,
            r.peak_memory_kb(),
            r.visited,
            r.path_len,
            r.cost
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_search::heuristic::Manhattan;
    use pathlab_search::{NoProbe, Network, Outcome, Recorder, astar, compare};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_grid_keeps_endpoints_free() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = random_grid(10, 6, 0.9, &mut rng);
        assert_eq!(grid.start(), Some(Point::new(0, 0)));
        assert_eq!(grid.goal(), Some(Point::new(9, 5)));
        assert!(grid.count(Label::Obstacle) > 0);
    }

    #[test]
    fn replay_paints_search_state() {
        let mut grid = GridMap::from_ascii(
            "
            S...
            .##.
            ...G
            ",
        )
        .unwrap();
        let (s, g) = (grid.start().unwrap(), grid.goal().unwrap());
        let mut rec = Recorder::new();
        let r = astar(&grid, s, g, Manhattan, &mut rec).unwrap();
        replay(&mut grid, &rec.steps, &r.path);

        let text = render(&grid, false);
        assert_eq!(text.matches('*').count(), r.path.len() - 2);
        assert!(text.starts_with('S'));
        assert_eq!(text.lines().count(), 3);

        replay(&mut grid, &[], &[]);
        assert_eq!(grid.count(Label::Path), 0);
    }

    #[test]
    fn colored_render_keeps_glyphs() {
        let grid = GridMap::from_ascii("S#G").unwrap();
        let text = render(&grid, true);
        assert!(text.contains('S') && text.contains('#') && text.contains('G'));
    }

    #[test]
    fn table_has_a_row_per_report() {
        let grid = GridMap::new(4, 4);
        let reports = compare(&grid, Point::new(0, 0), Point::new(3, 3), &Algorithm::GRID, &NoProbe).unwrap();
        let table = report_table(&reports);
        assert_eq!(table.lines().count(), 2 + reports.len());
        assert!(table.contains("A* (Manhattan)"));
        assert!(reports.iter().all(|r| r.outcome == Outcome::Found));
    }

    #[test]
    fn graph_line_up_runs_coordinate_heuristics() {
        let mut rng = StdRng::seed_from_u64(5);
        let net = Network::random_connected(30, 0.1, &mut rng);
        let reports = compare(&net, 0, 29, &GRAPH_ALGORITHMS, &NoProbe).unwrap();
        assert_eq!(reports.len(), GRAPH_ALGORITHMS.len());
        assert!(reports.iter().any(|r| r.algorithm == "A* (Euclidean)"));
        assert!(reports.iter().any(|r| r.algorithm == "A* (Manhattan)"));
        assert!(reports.iter().all(|r| r.outcome == Outcome::Found));
    }
}
