//! Seams between the routing core and its collaborators.
//!
//! The planner only needs a cost oracle; progress tracking only needs to
//! know which stops are done. Callers plug their own state in here.

use std::collections::{HashMap, HashSet};

use crate::error::RouteError;
use crate::graph::PointId;
use crate::shortest_path::ShortestPath;

/// Answers shortest-path queries between two graph points.
///
/// Unreachable pairs are a valid answer (`ShortestPath::unreachable()`),
/// not an error. Unknown points are an error.
pub trait PathOracle {
    fn shortest_path(&self, from: &PointId, to: &PointId) -> Result<ShortestPath, RouteError>;
}

/// Reports whether the shopper has finished everything at a stop.
pub trait CompletionProvider {
    fn is_stop_complete(&self, point: &PointId) -> bool;
}

/// A set of finished stops.
impl CompletionProvider for HashSet<PointId> {
    fn is_stop_complete(&self, point: &PointId) -> bool {
        self.contains(point)
    }
}

/// Per-stop flags; missing stops count as not done.
impl CompletionProvider for HashMap<PointId, bool> {
    fn is_stop_complete(&self, point: &PointId) -> bool {
        self.get(point).copied().unwrap_or(false)
    }
}
