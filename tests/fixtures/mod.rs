//! Test fixtures for aisle-router.
//!
//! Provides:
//! - A builder for small custom store layouts
//! - Id helpers and a brute-force reference tour cost

#![allow(dead_code)]

use std::collections::BTreeMap;

use aisle_router::graph::{Coordinate, Point, PointId, StoreGraph, StoreLayout};
use aisle_router::shortest_path::dijkstra;

pub fn id(name: &str) -> PointId {
    PointId::from(name)
}

pub fn ids(names: &[&str]) -> Vec<PointId> {
    names.iter().map(|&name| PointId::from(name)).collect()
}

pub fn names(points: &[PointId]) -> Vec<&str> {
    points.iter().map(PointId::as_str).collect()
}

/// Builder for test layouts with sensible defaults.
#[derive(Clone, Debug)]
pub struct LayoutBuilder {
    layout: StoreLayout,
}

impl LayoutBuilder {
    pub fn new(home: &str) -> Self {
        Self {
            layout: StoreLayout {
                home: id(home),
                points: Vec::new(),
                edges: BTreeMap::new(),
                aisles: BTreeMap::new(),
            },
        }
        .point(home, 0.0, 0.0)
    }

    pub fn point(mut self, name: &str, lat: f64, lng: f64) -> Self {
        self.layout.points.push(Point {
            name: id(name),
            aisle: None,
            coords: Coordinate::new(lat, lng),
        });
        self
    }

    /// A point with an aisle label, indexed under its lowercase name.
    pub fn aisle_point(mut self, name: &str, aisle: &str, lat: f64, lng: f64) -> Self {
        self.layout.points.push(Point {
            name: id(name),
            aisle: Some(aisle.to_string()),
            coords: Coordinate::new(lat, lng),
        });
        self.layout.aisles.insert(aisle.to_lowercase(), id(name));
        self
    }

    pub fn edge(mut self, from: &str, to: &str, cost: f64) -> Self {
        self.layout
            .edges
            .entry(id(from))
            .or_default()
            .insert(id(to), cost);
        self
    }

    pub fn layout(self) -> StoreLayout {
        self.layout
    }

    pub fn build(self) -> StoreGraph {
        StoreGraph::from_layout(self.layout).expect("test layout should be valid")
    }
}

/// A store where `X` sits on an island with no aisle to the rest.
pub fn split_store() -> StoreGraph {
    LayoutBuilder::new("H")
        .aisle_point("A", "Dairy", 0.0, 1.0)
        .aisle_point("X", "Island", 5.0, 5.0)
        .edge("H", "A", 1.0)
        .build()
}

/// Every permutation of `items`, generated naively.
pub fn permutations(items: &[PointId]) -> Vec<Vec<PointId>> {
    if items.is_empty() {
        return vec![Vec::new()];
    }
    let mut all = Vec::new();
    for (i, first) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first.clone());
            all.push(tail);
        }
    }
    all
}

/// Cost of visiting `order` from `home` and back, using fresh searches.
pub fn closed_walk_cost(graph: &StoreGraph, home: &PointId, order: &[PointId]) -> f64 {
    let mut cost = 0.0;
    let mut last = home.clone();
    for stop in order {
        cost += dijkstra(graph, &last, stop).unwrap().distance;
        last = stop.clone();
    }
    cost + dijkstra(graph, &last, home).unwrap().distance
}

/// Minimum closed-walk cost over all orderings.
pub fn brute_force_cost(graph: &StoreGraph, home: &PointId, required: &[PointId]) -> f64 {
    permutations(required)
        .iter()
        .map(|order| closed_walk_cost(graph, home, order))
        .fold(f64::INFINITY, f64::min)
}
