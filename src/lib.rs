//! aisle-router core
//!
//! Shortest-tour routing through a fixed in-store graph: Dijkstra legs,
//! an exact tour solver over the required aisles, and the geometry the
//! map view draws.

pub mod error;
pub mod traits;
pub mod graph;
pub mod shortest_path;
pub mod solver;
pub mod reconstruct;
pub mod polyline;
pub mod haversine;
pub mod progress;
pub mod checklist;
