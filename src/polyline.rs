//! Polyline representation for route geometries.
//!
//! The map view draws these directly; encoding into any compact wire
//! format is left to the rendering side.

use serde::{Deserialize, Serialize};

use crate::graph::Coordinate;
use crate::haversine;

/// A route geometry as an ordered list of coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Builds a polyline, collapsing runs of identical coordinates.
    pub fn from_coords_dedup<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut points: Vec<Coordinate> = Vec::new();
        for coord in coords {
            if points.last() != Some(&coord) {
                points.push(coord);
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Great-circle length in metres.
    pub fn length_m(&self) -> f64 {
        haversine::path_length_m(&self.points)
    }
}
