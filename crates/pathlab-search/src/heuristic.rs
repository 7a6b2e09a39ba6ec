//! Distance functions and the heuristic providers built on them.
//!
//! A* is optimal only when its heuristic is admissible (never overestimates
//! the remaining cost). [`Manhattan`] and [`Euclidean`] are admissible on
//! unit-cost grids, [`GreatCircle`] on networks whose edge lengths are
//! ground distances. [`GeoManhattan`] with its default inflation of 1.2 is
//! not admissible and may return a longer path in exchange for fewer
//! expansions on street grids that are not axis-aligned.

use std::fmt;

use pathlab_core::Coord;

use crate::traits::{Graph, Spatial};

/// Mean Earth radius used by [`haversine`], in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Manhattan (L1) distance between two planar coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) distance between two planar coordinates.
#[inline]
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Great-circle distance in meters between two lon/lat coordinates.
pub fn haversine(a: Coord, b: Coord) -> f64 {
    let (lat1, lon1) = (a.lat().to_radians(), a.lon().to_radians());
    let (lat2, lon2) = (b.lat().to_radians(), b.lon().to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Estimate of the remaining cost from a node to the goal.
pub trait Heuristic<G: Graph + ?Sized> {
    /// Non-negative estimate of the cost from `from` to `to`.
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64;
}

impl<G: Graph + ?Sized, H: Heuristic<G> + ?Sized> Heuristic<G> for &H {
    #[inline]
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        (**self).estimate(graph, from, to)
    }
}

/// Always 0; turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zero;

impl<G: Graph + ?Sized> Heuristic<G> for Zero {
    #[inline]
    fn estimate(&self, _graph: &G, _from: G::Node, _to: G::Node) -> f64 {
        0.0
    }
}

// Nodes without a position contribute nothing, which keeps the estimate
// admissible.
#[inline]
fn with_coords<G: Spatial + ?Sized>(graph: &G, from: G::Node, to: G::Node, f: fn(Coord, Coord) -> f64) -> f64 {
    match (graph.coord(from), graph.coord(to)) {
        (Some(a), Some(b)) => f(a, b),
        _ => 0.0,
    }
}

/// Sum of absolute coordinate differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Manhattan;

impl<G: Spatial + ?Sized> Heuristic<G> for Manhattan {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        with_coords(graph, from, to, manhattan)
    }
}

/// Straight-line distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Euclidean;

impl<G: Spatial + ?Sized> Heuristic<G> for Euclidean {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        with_coords(graph, from, to, euclidean)
    }
}

/// Haversine distance in meters, reading coordinates as lon/lat.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl<G: Spatial + ?Sized> Heuristic<G> for GreatCircle {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        with_coords(graph, from, to, haversine)
    }
}

/// "Manhattan on a sphere": an east-west leg plus a north-south leg, both
/// great-circle distances, multiplied by `inflation`.
#[derive(Debug, Clone, Copy)]
pub struct GeoManhattan {
    pub inflation: f64,
}

impl GeoManhattan {
    /// Inflation applied by [`Default`].
    pub const DEFAULT_INFLATION: f64 = 1.2;

    /// Use a custom inflation factor; 1.0 keeps the estimate admissible.
    pub fn with_inflation(inflation: f64) -> Self {
        Self { inflation }
    }
}

impl Default for GeoManhattan {
    fn default() -> Self {
        Self {
            inflation: Self::DEFAULT_INFLATION,
        }
    }
}

impl<G: Spatial + ?Sized> Heuristic<G> for GeoManhattan {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        let (Some(a), Some(b)) = (graph.coord(from), graph.coord(to)) else {
            return 0.0;
        };
        let dx = haversine(a, Coord::from_lat_lon(a.lat(), b.lon()));
        let dy = haversine(a, Coord::from_lat_lon(b.lat(), a.lon()));
        self.inflation * (dx + dy)
    }
}

/// Absolute difference of integer vertex ids. Only meaningful when ids
/// were assigned along some spatial order; kept for benchmark parity.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdDistance;

impl<G: Graph<Node = u64> + ?Sized> Heuristic<G> for IdDistance {
    fn estimate(&self, _graph: &G, from: u64, to: u64) -> f64 {
        from.abs_diff(to) as f64
    }
}

/// Scales another heuristic, e.g. to account for anisotropic cell sizes.
#[derive(Debug, Clone, Copy)]
pub struct Scaled<H> {
    pub inner: H,
    pub factor: f64,
}

impl<H> Scaled<H> {
    pub fn new(inner: H, factor: f64) -> Self {
        Self { inner, factor }
    }
}

impl<G: Graph + ?Sized, H: Heuristic<G>> Heuristic<G> for Scaled<H> {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        self.factor * self.inner.estimate(graph, from, to)
    }
}

/// Heuristic backed by a closure over node pairs. See [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnHeuristic<F>(F);

/// Wrap `f(from, to)` as a [`Heuristic`].
pub fn from_fn<N, F: Fn(N, N) -> f64>(f: F) -> FnHeuristic<F> {
    FnHeuristic(f)
}

impl<G: Graph + ?Sized, F: Fn(G::Node, G::Node) -> f64> Heuristic<G> for FnHeuristic<F> {
    fn estimate(&self, _graph: &G, from: G::Node, to: G::Node) -> f64 {
        (self.0)(from, to)
    }
}

/// Heuristics selectable at run time for any [`Spatial`] graph.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    Zero,
    Manhattan,
    Euclidean,
    GreatCircle,
    GeoManhattan { inflation: f64 },
}

impl HeuristicKind {
    /// Short label used in reports.
    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Zero => "Zero",
            HeuristicKind::Manhattan => "Manhattan",
            HeuristicKind::Euclidean => "Euclidean",
            HeuristicKind::GreatCircle => "Great-circle",
            HeuristicKind::GeoManhattan { .. } => "Geo-Manhattan",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<G: Spatial + ?Sized> Heuristic<G> for HeuristicKind {
    fn estimate(&self, graph: &G, from: G::Node, to: G::Node) -> f64 {
        match *self {
            HeuristicKind::Zero => 0.0,
            HeuristicKind::Manhattan => Manhattan.estimate(graph, from, to),
            HeuristicKind::Euclidean => Euclidean.estimate(graph, from, to),
            HeuristicKind::GreatCircle => GreatCircle.estimate(graph, from, to),
            HeuristicKind::GeoManhattan { inflation } => {
                GeoManhattan::with_inflation(inflation).estimate(graph, from, to)
            }
        }
    }
}
