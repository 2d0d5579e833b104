//! Expands a visit order into the walkable route and its geometry.

use serde::Serialize;

use crate::error::RouteError;
use crate::graph::{PointId, StoreGraph};
use crate::polyline::Polyline;
use crate::traits::PathOracle;

/// The planned route as point ids and as drawable polylines.
///
/// `legs[i]` is the shortest path between `visit_order[i]` and
/// `visit_order[i + 1]`; `leg_coords[i]` is its geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGeometry {
    pub full_path: Vec<PointId>,
    pub legs: Vec<Vec<PointId>>,
    pub coords: Polyline,
    pub leg_coords: Vec<Polyline>,
    pub walking_distance_m: f64,
}

/// Stitch the legs of `visit_order` into one path.
///
/// The first leg is taken whole; each later leg drops its first point,
/// which repeats the previous leg's last one.
pub fn reconstruct<O: PathOracle>(
    oracle: &O,
    graph: &StoreGraph,
    visit_order: &[PointId],
) -> Result<RouteGeometry, RouteError> {
    let mut full_path: Vec<PointId> = Vec::new();
    let mut legs = Vec::with_capacity(visit_order.len().saturating_sub(1));

    if let [only] = visit_order {
        graph.coords(only)?;
        full_path.push(only.clone());
    }

    for pair in visit_order.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let leg = oracle.shortest_path(from, to)?;
        if !leg.is_reachable() {
            return Err(RouteError::NoRouteFound {
                unreachable: vec![to.to_string()],
            });
        }

        let skip = if full_path.is_empty() { 0 } else { 1 };
        full_path.extend(leg.path.iter().skip(skip).cloned());
        legs.push(leg.path);
    }

    let coords = Polyline::from_coords_dedup(
        full_path
            .iter()
            .map(|point| graph.coords(point))
            .collect::<Result<Vec<_>, _>>()?,
    );

    let leg_coords = legs
        .iter()
        .map(|leg| {
            leg.iter()
                .map(|point| graph.coords(point))
                .collect::<Result<Vec<_>, _>>()
                .map(Polyline::new)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let walking_distance_m = coords.length_m();

    Ok(RouteGeometry {
        full_path,
        legs,
        coords,
        leg_coords,
        walking_distance_m,
    })
}
