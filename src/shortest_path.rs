//! Point-to-point shortest paths over the store graph.
//!
//! Dijkstra with a binary-heap frontier, stopping as soon as the
//! destination is settled. `PathEngine` memoizes results per unordered
//! point pair; the graph is static, so entries never go stale.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::error::RouteError;
use crate::graph::{PointId, StoreGraph};
use crate::traits::PathOracle;

/// A minimum-cost path, source to destination inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    pub path: Vec<PointId>,
    pub distance: f64,
}

impl ShortestPath {
    /// Sentinel for "no path": infinite distance, empty path.
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }

    /// The same path walked the other way.
    pub fn reversed(&self) -> Self {
        let mut path = self.path.clone();
        path.reverse();
        Self {
            path,
            distance: self.distance,
        }
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State<'a> {
    cost: f64,
    seq: usize,
    point: &'a PointId,
}

impl Eq for State<'_> {}

// Min-heap by cost; equal costs pop in push order.
impl Ord for State<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-pair Dijkstra without memoization.
pub fn dijkstra(
    graph: &StoreGraph,
    source: &PointId,
    destination: &PointId,
) -> Result<ShortestPath, RouteError> {
    let source = graph
        .point(source.as_str())
        .map(|point| &point.name)
        .ok_or_else(|| RouteError::UnknownPoint(source.to_string()))?;
    if !graph.contains(destination.as_str()) {
        return Err(RouteError::UnknownPoint(destination.to_string()));
    }

    if source == destination {
        return Ok(ShortestPath {
            path: vec![source.clone()],
            distance: 0.0,
        });
    }

    let mut dist: HashMap<&PointId, f64> = HashMap::new();
    let mut previous: HashMap<&PointId, &PointId> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0;

    dist.insert(source, 0.0);
    heap.push(State {
        cost: 0.0,
        seq,
        point: source,
    });

    while let Some(State { cost, point, .. }) = heap.pop() {
        if point == destination {
            let mut path = vec![point.clone()];
            let mut current = point;
            while let Some(&prev) = previous.get(current) {
                path.push(prev.clone());
                current = prev;
            }
            path.reverse();
            return Ok(ShortestPath {
                path,
                distance: cost,
            });
        }

        if cost > dist.get(point).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for (next, weight) in graph.neighbors(point.as_str()) {
            let next_cost = cost + weight;
            if next_cost < dist.get(next).copied().unwrap_or(f64::INFINITY) {
                dist.insert(next, next_cost);
                previous.insert(next, point);
                seq += 1;
                heap.push(State {
                    cost: next_cost,
                    seq,
                    point: next,
                });
            }
        }
    }

    Ok(ShortestPath::unreachable())
}

/// Memo table keyed by unordered point pair.
///
/// Paths are stored oriented from the smaller id to the larger one and
/// reversed on the way out when queried the other way round.
#[derive(Debug, Default)]
pub struct PathCache {
    entries: Mutex<HashMap<(PointId, PointId), ShortestPath>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached path for the pair, or `compute`'s result stored for next time.
    ///
    /// `compute` must return the path oriented `from` to `to`. The lock is
    /// held while it runs, so each pair is computed at most once even when
    /// several threads miss on it together. Errors are not cached.
    pub fn get_or_compute<F>(
        &self,
        from: &PointId,
        to: &PointId,
        compute: F,
    ) -> Result<ShortestPath, RouteError>
    where
        F: FnOnce() -> Result<ShortestPath, RouteError>,
    {
        let forward = from <= to;
        let key = if forward {
            (from.clone(), to.clone())
        } else {
            (to.clone(), from.clone())
        };

        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let stored = match entries.get(&key).cloned() {
            Some(stored) => stored,
            None => {
                let computed = compute()?;
                let stored = if forward { computed } else { computed.reversed() };
                entries.insert(key, stored.clone());
                stored
            }
        };
        drop(entries);

        Ok(if forward { stored } else { stored.reversed() })
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shortest-path oracle over one store graph with its own cache.
///
/// Build one per graph and share it by reference; the cache is safe to
/// use from several threads.
#[derive(Debug)]
pub struct PathEngine<'g> {
    graph: &'g StoreGraph,
    cache: PathCache,
    computed: AtomicUsize,
}

impl<'g> PathEngine<'g> {
    pub fn new(graph: &'g StoreGraph) -> Self {
        Self {
            graph,
            cache: PathCache::new(),
            computed: AtomicUsize::new(0),
        }
    }

    pub fn graph(&self) -> &'g StoreGraph {
        self.graph
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Number of Dijkstra searches actually run. Self paths and cache
    /// hits never search.
    pub fn searches(&self) -> usize {
        self.computed.load(AtomicOrdering::Relaxed)
    }
}

impl PathOracle for PathEngine<'_> {
    fn shortest_path(&self, from: &PointId, to: &PointId) -> Result<ShortestPath, RouteError> {
        if from == to {
            if !self.graph.contains(from.as_str()) {
                return Err(RouteError::UnknownPoint(from.to_string()));
            }
            return Ok(ShortestPath {
                path: vec![from.clone()],
                distance: 0.0,
            });
        }

        self.cache.get_or_compute(from, to, || {
            let result = dijkstra(self.graph, from, to)?;
            self.computed.fetch_add(1, AtomicOrdering::Relaxed);
            debug!(%from, %to, distance = result.distance, hops = result.path.len(), "computed shortest path");
            Ok(result)
        })
    }
}
