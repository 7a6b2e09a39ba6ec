//! Least-cost-first frontier for Dijkstra and A*.
//!
//! Entries are kept in a min-heap keyed by `(key, insertion_order)`. Lower
//! keys are popped first; ties are broken by insertion order (FIFO), so
//! nodes never need to be comparable and equal-cost alternatives always come
//! out in the same order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// An entry in the frontier.
#[derive(Debug)]
struct Entry<N, K> {
    node: N,
    key: K,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<N, K: PartialOrd> PartialEq for Entry<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N, K: PartialOrd> Eq for Entry<N, K> {}

impl<N, K: PartialOrd> PartialOrd for Entry<N, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N, K: PartialOrd> Ord for Entry<N, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Keys are finite costs; an incomparable pair falls through to seq.
        self.key
            .partial_cmp(&other.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority frontier.
///
/// `K` is the priority: a plain cost for Dijkstra, `(f, h)` for A*.
pub struct Frontier<N, K = f64> {
    heap: BinaryHeap<Reverse<Entry<N, K>>>,
    seq: u64,
    peak: usize,
}

impl<N, K: PartialOrd> Frontier<N, K> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
            peak: 0,
        }
    }

    /// Insert `node` with priority `key`.
    pub fn push(&mut self, key: K, node: N) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { node, key, seq }));
        self.peak = self.peak.max(self.heap.len());
    }

    /// Remove the entry with the lowest key (ties broken FIFO).
    pub fn pop_min(&mut self) -> Option<(K, N)> {
        self.heap.pop().map(|Reverse(entry)| (entry.key, entry.node))
    }

    /// Whether the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Largest number of entries held at once.
    pub fn peak_len(&self) -> usize {
        self.peak
    }
}

impl<N, K: PartialOrd> Default for Frontier<N, K> {
    fn default() -> Self {
        Self::new()
    }
}
