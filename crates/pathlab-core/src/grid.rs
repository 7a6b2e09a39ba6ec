//! A labelled cell grid, as edited interactively and painted by renderers.
//!
//! [`GridMap`] stores one [`Label`] per cell. Only obstacles matter to the
//! search engine; the remaining labels (start, goal, explored marks, final
//! path) exist so a renderer can draw the state of a search.

use std::fmt;

use thiserror::Error;

use crate::geom::{Point, Range};

/// Display label of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Label {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    /// Discovered and waiting in the frontier.
    Open,
    /// Expanded.
    Closed,
    /// Part of the final path.
    Path,
}

impl Label {
    /// Character used by the text form of a grid.
    pub const fn glyph(self) -> char {
        match self {
            Label::Empty => '.',
            Label::Obstacle => '#',
            Label::Start => 'S',
            Label::Goal => 'G',
            Label::Open => 'o',
            Label::Closed => 'x',
            Label::Path => '*',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(c: char) -> Option<Label> {
        Some(match c {
            '.' => Label::Empty,
            '#' => Label::Obstacle,
            'S' => Label::Start,
            'G' => Label::Goal,
            'o' => Label::Open,
            'x' => Label::Closed,
            '*' => Label::Path,
            _ => return None,
        })
    }

    /// Whether the label was produced by a search run (and is cleared by
    /// [`GridMap::clear_search_marks`]).
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Label::Open | Label::Closed | Label::Path)
    }

    /// Whether painting a search mark may replace this label.
    const fn paintable(self) -> bool {
        matches!(self, Label::Empty | Label::Open | Label::Closed | Label::Path)
    }
}

/// Error returned by [`GridMap::from_ascii`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    #[error("grid text is empty")]
    Empty,
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at {at}")]
    UnknownGlyph { glyph: char, at: Point },
    #[error("more than one {0:?} cell")]
    Duplicate(Label),
}

/// A `width × height` grid of [`Label`]s with at most one start and one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    cells: Vec<Label>,
    width: i32,
    height: i32,
    start: Option<Point>,
    goal: Option<Point>,
}

/// Number of cells in a `width` x `height` grid, computed without `i32`
/// overflow. Negative sides count as 0.
fn cell_count(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

impl GridMap {
    /// Create a grid of empty cells.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            cells: vec![Label::Empty; cell_count(width, height)],
            width,
            height,
            start: None,
            goal: None,
        }
    }

    /// Parse the text form: one line per row, see [`Label::glyph`].
    /// Leading and trailing blank lines and surrounding whitespace are ignored.
    pub fn from_ascii(text: &str) -> Result<Self, GridParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(GridParseError::Empty);
        };
        let width = first.chars().count();
        let mut grid = GridMap::new(width as i32, rows.len() as i32);

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridParseError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let at = Point::new(x as i32, y as i32);
                let label = Label::from_glyph(c).ok_or(GridParseError::UnknownGlyph { glyph: c, at })?;
                match label {
                    Label::Start if grid.start.is_some() => {
                        return Err(GridParseError::Duplicate(Label::Start));
                    }
                    Label::Goal if grid.goal.is_some() => {
                        return Err(GridParseError::Duplicate(Label::Goal));
                    }
                    Label::Start => grid.start = Some(at),
                    Label::Goal => grid.goal = Some(at),
                    _ => {}
                }
                let i = grid.index(at);
                grid.cells[i] = label;
            }
        }
        Ok(grid)
    }

    /// Render the grid in its text form, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.cells.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|l| l.glyph()));
            out.push('\n');
        }
        out
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// The bounding range `[0, 0) - (width, height)`.
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Label at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<Label> {
        self.contains(p).then(|| self.cells[self.index(p)])
    }

    /// Whether `p` is inside the grid and blocked.
    #[inline]
    pub fn is_obstacle(&self, p: Point) -> bool {
        self.at(p) == Some(Label::Obstacle)
    }

    /// Current start cell.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// Current goal cell.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Move the start marker to `p`. Refused (returns `false`) when `p` is out
    /// of bounds or is the goal. Any previous start cell becomes empty.
    pub fn set_start(&mut self, p: Point) -> bool {
        if !self.contains(p) || self.goal == Some(p) {
            return false;
        }
        if let Some(old) = self.start.replace(p) {
            let i = self.index(old);
            self.cells[i] = Label::Empty;
        }
        let i = self.index(p);
        self.cells[i] = Label::Start;
        true
    }

    /// Move the goal marker to `p`. Refused when `p` is out of bounds or is
    /// the start.
    pub fn set_goal(&mut self, p: Point) -> bool {
        if !self.contains(p) || self.start == Some(p) {
            return false;
        }
        if let Some(old) = self.goal.replace(p) {
            let i = self.index(old);
            self.cells[i] = Label::Empty;
        }
        let i = self.index(p);
        self.cells[i] = Label::Goal;
        true
    }

    /// Block `p`. Start and goal cells cannot be blocked.
    pub fn set_obstacle(&mut self, p: Point) -> bool {
        if !self.contains(p) || self.start == Some(p) || self.goal == Some(p) {
            return false;
        }
        let i = self.index(p);
        self.cells[i] = Label::Obstacle;
        true
    }

    /// Reset `p` to empty, dropping the start or goal marker if it was there.
    pub fn erase(&mut self, p: Point) {
        if !self.contains(p) {
            return;
        }
        if self.start == Some(p) {
            self.start = None;
        }
        if self.goal == Some(p) {
            self.goal = None;
        }
        let i = self.index(p);
        self.cells[i] = Label::Empty;
    }

    /// Apply an editor action: place `label` at `p` with the same rules as
    /// the dedicated setters. Returns whether the cell changed.
    pub fn set(&mut self, p: Point, label: Label) -> bool {
        match label {
            Label::Start => self.set_start(p),
            Label::Goal => self.set_goal(p),
            Label::Obstacle => self.set_obstacle(p),
            Label::Empty => {
                let before = self.at(p);
                self.erase(p);
                before.is_some_and(|l| l != Label::Empty)
            }
            Label::Open | Label::Closed | Label::Path => {
                let before = self.at(p);
                self.paint(p, label);
                before != self.at(p)
            }
        }
    }

    /// Remove every open/closed/path mark left by a previous run, keeping
    /// obstacles, start and goal.
    pub fn clear_search_marks(&mut self) {
        for c in self.cells.iter_mut() {
            if c.is_search_mark() {
                *c = Label::Empty;
            }
        }
    }

    fn paint(&mut self, p: Point, label: Label) {
        if let Some(cur) = self.at(p) {
            if cur.paintable() {
                let i = self.index(p);
                self.cells[i] = label;
            }
        }
    }

    /// Mark `p` as discovered. Obstacles, start and goal keep their label.
    pub fn mark_open(&mut self, p: Point) {
        self.paint(p, Label::Open);
    }

    /// Mark `p` as expanded.
    pub fn mark_closed(&mut self, p: Point) {
        self.paint(p, Label::Closed);
    }

    /// Mark every cell of `path` as part of the final route.
    pub fn mark_path(&mut self, path: &[Point]) {
        for &p in path {
            self.paint(p, Label::Path);
        }
    }

    /// Number of cells currently carrying `label`.
    pub fn count(&self, label: Label) -> usize {
        self.cells.iter().filter(|&&c| c == label).count()
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii())
    }
}
