//! Weighted / geographic realization of the graph traits.
//!
//! A [`Network`] is an adjacency-list graph keyed by integer vertex ids, the
//! shape in which street networks are exported: each vertex may carry a
//! [`Coord`] (longitude/latitude) and each edge a length in meters.

use std::collections::HashMap;

use pathlab_core::Coord;
use rand::{Rng, RngExt};
use thiserror::Error;

use crate::traits::{Graph, Spatial, WeightedGraph};

/// Errors raised while building a [`Network`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidLength { from: u64, to: u64, length: f64 },
    #[error("vertex {0} does not exist")]
    UnknownVertex(u64),
}

#[derive(Debug, Clone)]
struct Vertex {
    id: u64,
    coord: Option<Coord>,
    edges: Vec<(usize, f64)>,
}

/// A graph of `u64`-identified vertices with non-negative edge lengths.
#[derive(Debug, Clone, Default)]
pub struct Network {
    index: HashMap<u64, usize>,
    vertices: Vec<Vertex>,
    edge_count: usize,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    fn vertex_index(&mut self, id: u64) -> usize {
        if let Some(&i) = self.index.get(&id) {
            return i;
        }
        let i = self.vertices.len();
        self.vertices.push(Vertex {
            id,
            coord: None,
            edges: Vec::new(),
        });
        self.index.insert(id, i);
        i
    }

    /// Add vertex `id` without a position. Adding an existing vertex is a no-op.
    pub fn add_node(&mut self, id: u64) {
        self.vertex_index(id);
    }

    /// Add vertex `id` at `coord`, or move it there if it already exists.
    pub fn add_node_at(&mut self, id: u64, coord: Coord) {
        let i = self.vertex_index(id);
        self.vertices[i].coord = Some(coord);
    }

    /// Add a directed edge. `length = None` means an unweighted edge of
    /// cost 1. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: u64, to: u64, length: Option<f64>) -> Result<(), NetworkError> {
        let length = length.unwrap_or(1.0);
        if !length.is_finite() || length < 0.0 {
            return Err(NetworkError::InvalidLength { from, to, length });
        }
        let fi = *self.index.get(&from).ok_or(NetworkError::UnknownVertex(from))?;
        let ti = *self.index.get(&to).ok_or(NetworkError::UnknownVertex(to))?;
        self.vertices[fi].edges.push((ti, length));
        self.edge_count += 1;
        Ok(())
    }

    /// Add the edge in both directions with the same length.
    pub fn add_undirected_edge(&mut self, a: u64, b: u64, length: Option<f64>) -> Result<(), NetworkError> {
        self.add_edge(a, b, length)?;
        self.add_edge(b, a, length)
    }

    /// Position of vertex `id`, if it has one.
    pub fn coord(&self, id: u64) -> Option<Coord> {
        self.index.get(&id).and_then(|&i| self.vertices[i].coord)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the network has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of directed edges (an undirected edge counts twice).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Vertex ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.vertices.iter().map(|v| v.id)
    }

    /// Sum of edge lengths along `path`, or `None` if two consecutive vertices
    /// are not adjacent.
    pub fn path_length(&self, path: &[u64]) -> Option<f64> {
        path.windows(2).try_fold(0.0, |acc, w| Some(acc + self.edge_length(w[0], w[1])?))
    }

    fn edge_length(&self, from: u64, to: u64) -> Option<f64> {
        let fi = *self.index.get(&from)?;
        let ti = *self.index.get(&to)?;
        self.vertices[fi]
            .edges
            .iter()
            .filter(|&&(t, _)| t == ti)
            .map(|&(_, w)| w)
            .min_by(f64::total_cmp)
    }

    /// Generate a connected random graph on vertices `0..n`: every pair is
    /// joined with probability `density` and the draw is repeated until the
    /// graph is connected. Edges are undirected with integer lengths in
    /// `1..=4`. Vertices get random planar coordinates in the unit square.
    ///
    /// `density` is clamped to `[0, 1]`; with `n >= 2` and a density too low
    /// to ever connect, a spanning path is added after 64 failed draws.
    pub fn random_connected<R: Rng>(n: usize, density: f64, rng: &mut R) -> Self {
        let density = density.clamp(0.0, 1.0);
        let mut attempt = 0;
        loop {
            let mut net = Network::new();
            for id in 0..n as u64 {
                let coord = Coord::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0));
                net.add_node_at(id, coord);
            }
            for a in 0..n as u64 {
                for b in a + 1..n as u64 {
                    if rng.random_range(0.0..1.0) < density {
                        let w = rng.random_range(1..=4u32) as f64;
                        net.link(a, b, w);
                    }
                }
            }
            if attempt >= 64 {
                for a in 1..n as u64 {
                    net.link(a - 1, a, rng.random_range(1..=4u32) as f64);
                }
            }
            if net.is_connected() {
                log::debug!("random network: {} vertices, {} edges after {} draws", n, net.edge_count, attempt + 1);
                return net;
            }
            attempt += 1;
        }
    }

    // Vertices already exist and `w` is a valid length.
    fn link(&mut self, a: u64, b: u64, w: f64) {
        let (ai, bi) = (self.index[&a], self.index[&b]);
        self.vertices[ai].edges.push((bi, w));
        self.vertices[bi].edges.push((ai, w));
        self.edge_count += 2;
    }

    fn is_connected(&self) -> bool {
        match self.vertices.first() {
            Some(v) => crate::reach::reachable(self, v.id).len() == self.len(),
            None => true,
        }
    }
}

impl Graph for Network {
    type Node = u64;

    #[inline]
    fn contains(&self, id: u64) -> bool {
        self.index.contains_key(&id)
    }

    fn neighbors(&self, id: u64, buf: &mut Vec<u64>) {
        if let Some(&i) = self.index.get(&id) {
            buf.extend(self.vertices[i].edges.iter().map(|&(t, _)| self.vertices[t].id));
        }
    }

    fn node_count(&self) -> usize {
        self.vertices.len()
    }
}

impl WeightedGraph for Network {
    /// Shortest parallel edge between the two vertices; `INFINITY` if they
    /// are not adjacent.
    fn cost(&self, from: u64, to: u64) -> f64 {
        self.edge_length(from, to).unwrap_or(f64::INFINITY)
    }
}

impl Spatial for Network {
    fn coord(&self, id: u64) -> Option<Coord> {
        Network::coord(self, id)
    }
}
