//! Store graph: named points, weighted aisles between them, and the
//! aisle-name index the shopping list is resolved through.
//!
//! Graphs are immutable once built. They come either from the bundled
//! layout or from a JSON document with the same shape.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// Latitude/longitude of a point on the store map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Identity of a graph point, e.g. `"J"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PointId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named location in the store. Junctions carry no aisle label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub name: PointId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aisle: Option<String>,
    pub coords: Coordinate,
}

/// Serialized form of a store graph.
///
/// `edges` may list each aisle in one direction only; the graph mirrors it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreLayout {
    pub home: PointId,
    pub points: Vec<Point>,
    pub edges: BTreeMap<PointId, BTreeMap<PointId, f64>>,
    #[serde(default)]
    pub aisles: BTreeMap<String, PointId>,
}

impl StoreLayout {
    /// The ten-point demo store, entrance/checkout at `J`.
    pub fn bundled() -> Self {
        let point = |name: &str, aisle: Option<&str>, lat: f64, lng: f64| Point {
            name: PointId::from(name),
            aisle: aisle.map(str::to_string),
            coords: Coordinate::new(lat, lng),
        };

        let points = vec![
            point("A", Some("Garden"), 29.736264, -95.511970),
            point("B", None, 29.736163, -95.511943),
            point("C", Some("Hardware"), 29.736171, -95.511492),
            point("D", Some("Entertainment"), 29.735719, -95.511474),
            point("E", Some("Clothing"), 29.735671, -95.511818),
            point("F", Some("Pet Care"), 29.735336, -95.511380),
            point("G", Some("Grocery"), 29.734889, -95.511374),
            point("H", None, 29.734849, -95.511737),
            point("I", Some("Bakery"), 29.734829, -95.512004),
            point("J", Some("Door/Checkout"), 29.735715, -95.512066),
        ];

        let edge_list: &[(&str, &str, f64)] = &[
            ("A", "B", 0.0),
            ("B", "C", 2.0),
            ("B", "J", 1.0),
            ("C", "D", 2.0),
            ("D", "E", 1.0),
            ("D", "F", 1.0),
            ("E", "H", 2.0),
            ("F", "G", 1.0),
            ("G", "H", 1.0),
            ("H", "I", 1.0),
            ("I", "J", 2.0),
        ];
        let mut edges: BTreeMap<PointId, BTreeMap<PointId, f64>> = BTreeMap::new();
        for &(from, to, cost) in edge_list {
            edges.entry(from.into()).or_default().insert(to.into(), cost);
        }

        // produce and deli share a stop with garden and bakery
        let aisles = [
            ("garden", "A"),
            ("hardware", "C"),
            ("entertainment", "D"),
            ("clothing", "E"),
            ("pet care", "F"),
            ("grocery", "G"),
            ("bakery", "I"),
            ("produce", "A"),
            ("deli", "I"),
        ]
        .into_iter()
        .map(|(aisle, point)| (aisle.to_string(), PointId::from(point)))
        .collect();

        Self {
            home: PointId::from("J"),
            points,
            edges,
            aisles,
        }
    }
}

/// Immutable store graph with symmetric adjacency.
#[derive(Debug, Clone)]
pub struct StoreGraph {
    home: PointId,
    points: BTreeMap<PointId, Point>,
    adjacency: BTreeMap<PointId, BTreeMap<PointId, f64>>,
    aisles: BTreeMap<String, PointId>,
}

impl StoreGraph {
    /// The bundled demo store.
    pub fn bundled() -> Self {
        Self::assemble(StoreLayout::bundled())
    }

    /// Validate a layout and build the graph from it.
    pub fn from_layout(layout: StoreLayout) -> Result<Self, RouteError> {
        validate(&layout)?;
        Ok(Self::assemble(layout))
    }

    pub fn from_json_str(json: &str) -> Result<Self, RouteError> {
        let layout: StoreLayout = serde_json::from_str(json)?;
        Self::from_layout(layout)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn assemble(layout: StoreLayout) -> Self {
        let mut adjacency: BTreeMap<PointId, BTreeMap<PointId, f64>> = layout
            .points
            .iter()
            .map(|point| (point.name.clone(), BTreeMap::new()))
            .collect();

        for (from, neighbors) in &layout.edges {
            for (to, &cost) in neighbors {
                adjacency.entry(from.clone()).or_default().insert(to.clone(), cost);
                adjacency.entry(to.clone()).or_default().insert(from.clone(), cost);
            }
        }

        let points = layout
            .points
            .into_iter()
            .map(|point| (point.name.clone(), point))
            .collect();

        Self {
            home: layout.home,
            points,
            adjacency,
            aisles: layout.aisles,
        }
    }

    /// Entrance/checkout every tour starts and ends at.
    pub fn home(&self) -> &PointId {
        &self.home
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    pub fn point(&self, id: &str) -> Option<&Point> {
        self.points.get(id)
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.values()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn coords(&self, id: &PointId) -> Result<Coordinate, RouteError> {
        self.points
            .get(id)
            .map(|point| point.coords)
            .ok_or_else(|| RouteError::UnknownPoint(id.to_string()))
    }

    /// Neighbors of `id` with edge costs, in id order.
    pub fn neighbors<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a PointId, f64)> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(to, &cost)| (to, cost)))
    }

    /// Direct edge cost, if the two points are adjacent.
    pub fn edge_cost(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from).and_then(|neighbors| neighbors.get(to)).copied()
    }

    /// Look up the point an aisle name lives at. Case and surrounding
    /// whitespace are ignored; unknown aisles have no location.
    pub fn resolve_aisle(&self, aisle: &str) -> Option<&PointId> {
        self.aisles.get(normalize_aisle(aisle).as_str())
    }

    /// Resolve aisle names to distinct points in first-seen order.
    ///
    /// Returns the points and the names that matched nothing.
    pub fn resolve_aisles<'n, I>(&self, aisles: I) -> (Vec<PointId>, Vec<String>)
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for aisle in aisles {
            match self.resolve_aisle(aisle) {
                Some(point) => {
                    if seen.insert(point.clone()) {
                        resolved.push(point.clone());
                    }
                }
                None => unresolved.push(aisle.to_string()),
            }
        }
        (resolved, unresolved)
    }

    /// Aisle names located at `point`.
    pub fn aisles_at<'a>(&'a self, point: &'a PointId) -> impl Iterator<Item = &'a str> + 'a {
        self.aisles
            .iter()
            .filter(move |(_, at)| *at == point)
            .map(|(aisle, _)| aisle.as_str())
    }
}

pub(crate) fn normalize_aisle(aisle: &str) -> String {
    aisle.trim().to_lowercase()
}

fn validate(layout: &StoreLayout) -> Result<(), RouteError> {
    let invalid = |reason: String| Err(RouteError::InvalidLayout(reason));

    let mut names = HashSet::new();
    for point in &layout.points {
        if point.name.as_str().is_empty() {
            return invalid("point with empty name".to_string());
        }
        if !names.insert(point.name.as_str()) {
            return invalid(format!("duplicate point '{}'", point.name));
        }
        if !point.coords.lat.is_finite() || !point.coords.lng.is_finite() {
            return invalid(format!("point '{}' has non-finite coordinates", point.name));
        }
    }

    if !names.contains(layout.home.as_str()) {
        return invalid(format!("home point '{}' is not defined", layout.home));
    }

    for (from, neighbors) in &layout.edges {
        for (to, &cost) in neighbors {
            if !names.contains(from.as_str()) || !names.contains(to.as_str()) {
                return invalid(format!("edge {} -> {} references an undefined point", from, to));
            }
            if from == to {
                return invalid(format!("self-loop at '{}'", from));
            }
            if !cost.is_finite() || cost < 0.0 {
                return invalid(format!("edge {} -> {} has invalid cost {}", from, to, cost));
            }
            let reverse = layout.edges.get(to).and_then(|back| back.get(from));
            if let Some(&reverse) = reverse {
                if reverse != cost {
                    return invalid(format!(
                        "edge {} <-> {} has asymmetric costs {} and {}",
                        from, to, cost, reverse
                    ));
                }
            }
        }
    }

    for (aisle, point) in &layout.aisles {
        if aisle.trim().is_empty() {
            return invalid("empty aisle name".to_string());
        }
        if *aisle != normalize_aisle(aisle) {
            return invalid(format!("aisle '{}' must be trimmed lowercase", aisle));
        }
        if !names.contains(point.as_str()) {
            return invalid(format!("aisle '{}' maps to undefined point '{}'", aisle, point));
        }
    }

    Ok(())
}
