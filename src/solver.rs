//! Exact tour solver over the required stops.
//!
//! Every ordering of the required points is scored against a pairwise
//! leg-cost matrix built from the path oracle, and the cheapest closed
//! tour from home wins. Search is O(n!), so the number of required
//! points is capped by `PlanOptions::max_required_points`.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::RouteError;
use crate::graph::{PointId, StoreGraph};
use crate::reconstruct::{reconstruct, RouteGeometry};
use crate::shortest_path::PathEngine;
use crate::traits::PathOracle;

/// Largest required set the exact search accepts by default.
///
/// 10! orderings is the point where a single plan stops feeling instant.
pub const DEFAULT_MAX_REQUIRED_POINTS: usize = 10;

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Hard limit on distinct required points (home excluded).
    pub max_required_points: usize,
    /// Score permutation blocks on the rayon pool.
    pub parallel: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            max_required_points: DEFAULT_MAX_REQUIRED_POINTS,
            parallel: true,
        }
    }
}

/// A closed tour: home, the required stops in chosen order, home.
///
/// A tour with nothing to visit is just `[home]` with zero cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub visit_order: Vec<PointId>,
    pub cost: f64,
}

impl Tour {
    pub fn home_only(home: PointId) -> Self {
        Self {
            visit_order: vec![home],
            cost: 0.0,
        }
    }

    /// Required stops in visiting order, without home at either end.
    pub fn stops(&self) -> &[PointId] {
        match self.visit_order.len() {
            0..=2 => &[],
            n => &self.visit_order[1..n - 1],
        }
    }

    pub fn leg_count(&self) -> usize {
        self.visit_order.len().saturating_sub(1)
    }
}

/// Plan the cheapest closed tour from `home` covering `required`.
///
/// Duplicates collapse and `home` itself is dropped from the required set.
/// Unknown point ids are reported before the size limit is checked.
/// Among equally cheap tours the first in generation order wins, where
/// orderings are generated lexicographically over the input order.
pub fn plan_tour<O>(
    oracle: &O,
    required: &[PointId],
    home: &PointId,
    options: &PlanOptions,
) -> Result<Tour, RouteError>
where
    O: PathOracle + Sync,
{
    let mut seen = HashSet::new();
    let to_visit: Vec<&PointId> = required
        .iter()
        .filter(|point| *point != home && seen.insert(*point))
        .collect();

    // self paths reject unknown ids without searching
    for point in std::iter::once(home).chain(to_visit.iter().copied()) {
        oracle.shortest_path(point, point)?;
    }

    if to_visit.is_empty() {
        return Ok(Tour::home_only(home.clone()));
    }

    if to_visit.len() > options.max_required_points {
        warn!(
            requested = to_visit.len(),
            limit = options.max_required_points,
            "required set too large for exact tour search"
        );
        return Err(RouteError::TooManyPoints {
            requested: to_visit.len(),
            limit: options.max_required_points,
        });
    }

    // index 0 is home, 1..=n the required points
    let nodes: Vec<&PointId> = std::iter::once(home).chain(to_visit.iter().copied()).collect();
    let matrix = leg_matrix(oracle, &nodes)?;

    let unreachable: Vec<String> = (1..nodes.len())
        .filter(|&i| !matrix[0][i].is_finite())
        .map(|i| nodes[i].to_string())
        .collect();
    if !unreachable.is_empty() {
        warn!(%home, ?unreachable, "required points unreachable from home");
        return Err(RouteError::NoRouteFound { unreachable });
    }

    let n = to_visit.len();
    debug!(required = n, parallel = options.parallel, "searching tour orderings");

    let blocks: Vec<Option<(f64, Vec<usize>)>> = if options.parallel && n > 1 {
        (1..=n)
            .into_par_iter()
            .map(|first| best_in_block(&matrix, first, n))
            .collect()
    } else {
        (1..=n).map(|first| best_in_block(&matrix, first, n)).collect()
    };

    // blocks arrive in first-stop order, so a strict `<` keeps the
    // earliest ordering among ties
    let mut best: Option<(f64, Vec<usize>)> = None;
    for (cost, order) in blocks.into_iter().flatten() {
        if best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, order));
        }
    }

    let Some((cost, order)) = best else {
        warn!(%home, "no finite tour covers the required points");
        return Err(RouteError::NoRouteFound {
            unreachable: Vec::new(),
        });
    };

    let mut visit_order = Vec::with_capacity(n + 2);
    visit_order.push(home.clone());
    visit_order.extend(order.iter().map(|&i| nodes[i].clone()));
    visit_order.push(home.clone());

    debug!(cost, stops = n, "tour planned");
    Ok(Tour { visit_order, cost })
}

/// Pairwise leg costs between `nodes`; infinite where unreachable.
fn leg_matrix<O: PathOracle>(oracle: &O, nodes: &[&PointId]) -> Result<Vec<Vec<f64>>, RouteError> {
    let n = nodes.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                matrix[i][j] = oracle.shortest_path(nodes[i], nodes[j])?.distance;
            }
        }
    }
    Ok(matrix)
}

/// Cheapest ordering of `1..=n` that starts with `first`.
///
/// Returns `None` when every ordering in the block is infinitely costly.
fn best_in_block(matrix: &[Vec<f64>], first: usize, n: usize) -> Option<(f64, Vec<usize>)> {
    let mut order: Vec<usize> = std::iter::once(first)
        .chain((1..=n).filter(|&i| i != first))
        .collect();

    let mut best: Option<(f64, Vec<usize>)> = None;
    loop {
        let cost = tour_cost(matrix, &order);
        if cost.is_finite() && best.as_ref().is_none_or(|(best_cost, _)| cost < *best_cost) {
            best = Some((cost, order.clone()));
        }
        if !next_permutation(&mut order[1..]) {
            break;
        }
    }
    best
}

/// Home to `order[0]`, through the rest, and back to home.
fn tour_cost(matrix: &[Vec<f64>], order: &[usize]) -> f64 {
    let mut cost = 0.0;
    let mut last = 0;
    for &stop in order {
        cost += matrix[last][stop];
        last = stop;
    }
    cost + matrix[last][0]
}

/// Advance to the next lexicographic permutation in place.
///
/// Returns false (leaving the slice sorted descending) after the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// A visit-order entry annotated for the checklist view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub point: PointId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
}

/// Everything the map view needs for one shopping trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedRoute {
    pub tour: Tour,
    pub stops: Vec<Stop>,
    pub geometry: RouteGeometry,
    /// Aisle names with no physical location in this store.
    pub unresolved_aisles: Vec<String>,
}

/// Graph, path cache, and options bundled for repeated planning.
#[derive(Debug)]
pub struct RoutePlanner<'g> {
    engine: PathEngine<'g>,
    options: PlanOptions,
}

impl<'g> RoutePlanner<'g> {
    pub fn new(graph: &'g StoreGraph, options: PlanOptions) -> Self {
        Self {
            engine: PathEngine::new(graph),
            options,
        }
    }

    pub fn engine(&self) -> &PathEngine<'g> {
        &self.engine
    }

    pub fn graph(&self) -> &'g StoreGraph {
        self.engine.graph()
    }

    /// Tour from the store's home point through `required`.
    pub fn plan_points(&self, required: &[PointId]) -> Result<Tour, RouteError> {
        plan_tour(&self.engine, required, self.graph().home(), &self.options)
    }

    /// Resolve aisle names, plan the tour, and build its geometry.
    ///
    /// Unknown aisle names are reported back, not treated as errors.
    pub fn plan_aisles<'n, I>(&self, aisles: I) -> Result<PlannedRoute, RouteError>
    where
        I: IntoIterator<Item = &'n str>,
    {
        let graph = self.graph();
        let (required, unresolved_aisles) = graph.resolve_aisles(aisles);
        let tour = self.plan_points(&required)?;
        let geometry = reconstruct(&self.engine, graph, &tour.visit_order)?;

        let stops = tour
            .visit_order
            .iter()
            .map(|point| Stop {
                point: point.clone(),
                aisle: graph.point(point.as_str()).and_then(|p| p.aisle.clone()),
            })
            .collect();

        Ok(PlannedRoute {
            tour,
            stops,
            geometry,
            unresolved_aisles,
        })
    }
}
