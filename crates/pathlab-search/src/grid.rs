//! Grid realization of the graph traits.
//!
//! Neighbors are derived from the current obstacle layout on every call, so
//! edits between searches are picked up without any invalidation step.

use pathlab_core::{Coord, GridMap, Point};

use crate::observer::Step;
use crate::traits::{Graph, Spatial, WeightedGraph};

impl Graph for GridMap {
    type Node = Point;

    #[inline]
    fn contains(&self, p: Point) -> bool {
        GridMap::contains(self, p) && !self.is_obstacle(p)
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if Graph::contains(self, n) {
                buf.push(n);
            }
        }
    }

    fn node_count(&self) -> usize {
        self.bounds().len()
    }
}

impl WeightedGraph for GridMap {
    #[inline]
    fn cost(&self, _from: Point, _to: Point) -> f64 {
        1.0
    }
}

impl Spatial for GridMap {
    #[inline]
    fn coord(&self, p: Point) -> Option<Coord> {
        GridMap::contains(self, p).then(|| Coord::from(p))
    }
}

/// Paint one exploration step onto a grid: opened cells become
/// [`Open`](pathlab_core::Label::Open), the closed cell becomes
/// [`Closed`](pathlab_core::Label::Closed).
pub fn paint_step(grid: &mut GridMap, step: &Step<'_, Point>) {
    for &p in step.opened {
        grid.mark_open(p);
    }
    if let Some(p) = step.closed {
        grid.mark_closed(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_core::Label;

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let grid = GridMap::from_ascii(
            "
            .#.
            ...
            ",
        )
        .unwrap();
        let mut buf = Vec::new();
        grid.neighbors(Point::new(0, 0), &mut buf);
        assert_eq!(buf, vec![Point::new(0, 1)]);

        buf.clear();
        grid.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, vec![Point::new(2, 1), Point::new(0, 1)]);
    }

    #[test]
    fn neighbors_follow_edits() {
        let mut grid = GridMap::new(3, 3);
        let mut buf = Vec::new();
        grid.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 4);

        grid.set_obstacle(Point::new(1, 0));
        buf.clear();
        grid.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf.len(), 3);
        assert!(!Graph::contains(&grid, Point::new(1, 0)));
    }

    #[test]
    fn unit_costs_and_coords() {
        let grid = GridMap::new(2, 2);
        assert_eq!(grid.cost(Point::new(0, 0), Point::new(1, 0)), 1.0);
        assert_eq!(grid.coord(Point::new(1, 0)), Some(Coord::new(1.0, 0.0)));
        assert_eq!(grid.coord(Point::new(2, 0)), None);
        assert_eq!(grid.node_count(), 4);
    }

    #[test]
    fn paint_step_marks_cells() {
        let mut grid = GridMap::from_ascii("S..").unwrap();
        let opened = [Point::new(1, 0)];
        paint_step(
            &mut grid,
            &Step {
                current: Point::new(0, 0),
                opened: &opened,
                closed: Some(Point::new(0, 0)),
            },
        );
        assert_eq!(grid.at(Point::new(0, 0)), Some(Label::Start));
        assert_eq!(grid.at(Point::new(1, 0)), Some(Label::Open));
    }
}
