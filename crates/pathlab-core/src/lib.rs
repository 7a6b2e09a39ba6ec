//! **pathlab-core**: shared data model for the pathlab search engine.
//!
//! This crate holds the types that both the engine and its collaborators
//! (editors, renderers, report writers) agree on: integer grid geometry,
//! planar/geographic coordinates, and the labelled grid used by the
//! interactive editor.

pub mod coord;
pub mod geom;
pub mod grid;

pub use coord::Coord;
pub use geom::{Point, Range, RangeIter};
pub use grid::{GridMap, GridParseError, Label};
