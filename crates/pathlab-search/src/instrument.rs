//! Timing and memory instrumentation around search calls.
//!
//! Instrumentation is composed, never woven into the result: [`measure`]
//! takes a search closure and returns its result untouched, alongside a flat
//! [`Report`] for tables and exports.

use std::alloc::{GlobalAlloc, Layout, System};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::algorithm::Algorithm;
use crate::error::SearchError;
use crate::observer::Observer;
use crate::search::{Outcome, SearchConfig, SearchResult};
use crate::traits::{Spatial, WeightedGraph};

/// Wall-clock time spent in each phase of one search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phases {
    /// Endpoint validation and bookkeeping allocation.
    pub setup: Duration,
    /// The expansion loop, observer calls included.
    pub traversal: Duration,
    /// Path reconstruction and costing; zero when no path was found.
    pub reconstruction: Duration,
}

impl Phases {
    /// Sum of all phases.
    pub fn total(&self) -> Duration {
        self.setup + self.traversal + self.reconstruction
    }
}

/// Source of peak-memory readings.
pub trait MemoryProbe {
    /// Start a measurement window and return the current usage in bytes.
    fn baseline(&self) -> usize;
    /// Peak usage above `baseline` since [`baseline`](Self::baseline) was
    /// called, in bytes.
    fn peak_since(&self, baseline: usize) -> usize;
}

/// Probe that always reports 0, for builds without [`TrackingAllocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProbe;

impl MemoryProbe for NoProbe {
    fn baseline(&self) -> usize {
        0
    }

    fn peak_since(&self, _baseline: usize) -> usize {
        0
    }
}

static CURRENT: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

/// Global allocator that forwards to [`System`] and tracks live and peak
/// heap usage. Install it in a binary or test crate to get memory figures:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOC: pathlab_search::TrackingAllocator = pathlab_search::TrackingAllocator;
/// ```
///
/// Counters are process-wide, so concurrent searches inflate each other's
/// peaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingAllocator;

impl TrackingAllocator {
    /// Bytes currently allocated through this allocator.
    pub fn current() -> usize {
        CURRENT.load(Ordering::Relaxed)
    }

    fn grow(bytes: usize) {
        let now = CURRENT.fetch_add(bytes, Ordering::Relaxed) + bytes;
        PEAK.fetch_max(now, Ordering::Relaxed);
    }

    fn shrink(bytes: usize) {
        CURRENT.fetch_sub(bytes, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            Self::grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            Self::grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        Self::shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new = unsafe { System.realloc(ptr, layout, new_size) };
        if !new.is_null() {
            if new_size >= layout.size() {
                Self::grow(new_size - layout.size());
            } else {
                Self::shrink(layout.size() - new_size);
            }
        }
        new
    }
}

impl MemoryProbe for TrackingAllocator {
    fn baseline(&self) -> usize {
        let now = CURRENT.load(Ordering::Relaxed);
        PEAK.store(now, Ordering::Relaxed);
        now
    }

    fn peak_since(&self, baseline: usize) -> usize {
        PEAK.load(Ordering::Relaxed).saturating_sub(baseline)
    }
}

/// Flat instrumentation record for one search call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub algorithm: String,
    pub outcome: Outcome,
    pub phases: Phases,
    /// Wall-clock time of the whole call.
    pub elapsed: Duration,
    /// Peak heap growth during the call, in bytes.
    pub peak_memory: usize,
    pub visited: usize,
    pub path_len: usize,
    pub cost: f64,
    pub frontier_peak: usize,
}

impl Report {
    /// Peak memory in kilobytes.
    pub fn peak_memory_kb(&self) -> f64 {
        self.peak_memory as f64 / 1024.0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | time {:.4}s  memory {:.1}KB  visited {}  path {}  cost {}",
            self.algorithm,
            self.elapsed.as_secs_f64(),
            self.peak_memory_kb(),
            self.visited,
            self.path_len,
            self.cost
        )?;
        if self.outcome != Outcome::Found {
            write!(f, "  ({})", self.outcome)?;
        }
        Ok(())
    }
}

/// Run `search` under measurement.
///
/// The closure receives the [`Phases`] to fill in (pass it to a `*_with`
/// search function). The result is returned exactly as `search` produced it.
pub fn measure<N, F>(
    algorithm: impl Into<String>,
    probe: &dyn MemoryProbe,
    search: F,
) -> Result<(SearchResult<N>, Report), SearchError>
where
    F: FnOnce(&mut Phases) -> Result<SearchResult<N>, SearchError>,
{
    let mut phases = Phases::default();
    let base = probe.baseline();
    let t = Instant::now();
    let result = search(&mut phases)?;
    let elapsed = t.elapsed();
    let peak_memory = probe.peak_since(base);

    let report = Report {
        algorithm: algorithm.into(),
        outcome: result.outcome,
        phases,
        elapsed,
        peak_memory,
        visited: result.visited_count(),
        path_len: result.path_len(),
        cost: result.cost,
        frontier_peak: result.frontier_peak,
    };
    log::debug!("{report}");
    Ok((result, report))
}

/// Measure one run of `algorithm`.
pub fn measure_algorithm<G, O>(
    algorithm: Algorithm,
    graph: &G,
    start: G::Node,
    goal: G::Node,
    observer: O,
    config: &SearchConfig,
    probe: &dyn MemoryProbe,
) -> Result<(SearchResult<G::Node>, Report), SearchError>
where
    G: WeightedGraph + Spatial + ?Sized,
    O: Observer<G::Node>,
{
    measure(algorithm.to_string(), probe, |phases| {
        algorithm.run_with(graph, start, goal, observer, config, phases)
    })
}

/// Run every algorithm in `algorithms` on the same query and return their
/// reports sorted by algorithm name.
pub fn compare<G>(
    graph: &G,
    start: G::Node,
    goal: G::Node,
    algorithms: &[Algorithm],
    probe: &dyn MemoryProbe,
) -> Result<Vec<Report>, SearchError>
where
    G: WeightedGraph + Spatial + ?Sized,
{
    let config = SearchConfig::default();
    let mut reports = algorithms
        .iter()
        .map(|&alg| measure_algorithm(alg, graph, start, goal, (), &config, probe).map(|(_, report)| report))
        .collect::<Result<Vec<_>, _>>()?;
    reports.sort_by(|a, b| a.algorithm.cmp(&b.algorithm));
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_with;
    use crate::heuristic::HeuristicKind;
    use pathlab_core::{GridMap, Point};

    #[test]
    fn measure_leaves_result_untouched() {
        let grid = GridMap::new(5, 5);
        let (s, g) = (Point::new(0, 0), Point::new(4, 4));
        let plain = crate::bfs::bfs(&grid, s, g, ()).unwrap();
        let (measured, report) = measure("BFS", &NoProbe, |phases| {
            bfs_with(&grid, s, g, (), &SearchConfig::default(), phases)
        })
        .unwrap();

        assert_eq!(measured.path, plain.path);
        assert_eq!(measured.visited, plain.visited);
        assert_eq!(report.algorithm, "BFS");
        assert_eq!(report.outcome, Outcome::Found);
        assert_eq!(report.visited, plain.visited_count());
        assert_eq!(report.path_len, 9);
        assert_eq!(report.cost, 8.0);
        assert_eq!(report.peak_memory, 0);
        assert!(report.phases.total() <= report.elapsed);
    }

    #[test]
    fn errors_pass_through() {
        let grid = GridMap::from_ascii("#..").unwrap();
        let r = measure_algorithm(
            Algorithm::Bfs,
            &grid,
            Point::new(0, 0),
            Point::new(2, 0),
            (),
            &SearchConfig::default(),
            &NoProbe,
        );
        assert!(matches!(r, Err(SearchError::UnknownNode { .. })));
    }

    #[test]
    fn compare_sorts_by_name() {
        let grid = GridMap::new(5, 5);
        let reports = compare(&grid, Point::new(0, 0), Point::new(4, 4), &Algorithm::GRID, &NoProbe).unwrap();
        let names: Vec<&str> = reports.iter().map(|r| r.algorithm.as_str()).collect();
        assert_eq!(
            names,
            vec!["A* (Euclidean)", "A* (Manhattan)", "BFS", "DFS", "Dijkstra"]
        );
        let manhattan = &reports[1];
        let dijkstra = &reports[4];
        assert_eq!(manhattan.cost, dijkstra.cost);
        assert!(manhattan.visited < dijkstra.visited);
    }

    #[test]
    fn display_line() {
        let report = Report {
            algorithm: Algorithm::AStar(HeuristicKind::Manhattan).to_string(),
            outcome: Outcome::Found,
            phases: Phases::default(),
            elapsed: Duration::from_micros(1200),
            peak_memory: 3482,
            visited: 9,
            path_len: 9,
            cost: 8.0,
            frontier_peak: 4,
        };
        assert_eq!(
            report.to_string(),
            "A* (Manhattan) | time 0.0012s  memory 3.4KB  visited 9  path 9  cost 8"
        );

        let cancelled = Report {
            outcome: Outcome::Cancelled,
            ..report
        };
        assert!(cancelled.to_string().ends_with("(cancelled)"));
    }
}
