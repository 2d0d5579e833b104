//! Which leg of a tour the shopper is currently walking.
//!
//! Works on the visit order alone: home, stops, home. It makes no
//! assumption about how the solver ordered the stops.

use serde::Serialize;

use crate::graph::PointId;
use crate::traits::CompletionProvider;

/// Index of the leg to highlight.
///
/// That is the leg ending at the first unfinished stop, or the final
/// leg back to home once every stop is done. `None` for a tour with no
/// legs.
pub fn current_leg<C>(visit_order: &[PointId], completion: &C) -> Option<usize>
where
    C: CompletionProvider + ?Sized,
{
    if visit_order.len() < 2 {
        return None;
    }
    let last_leg = visit_order.len() - 2;

    visit_order[1..visit_order.len() - 1]
        .iter()
        .position(|stop| !completion.is_stop_complete(stop))
        .or(Some(last_leg))
}

/// Snapshot of shopping progress along a tour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub current_leg: Option<usize>,
    pub completed_stops: usize,
    pub total_stops: usize,
}

impl Progress {
    pub fn is_finished(&self) -> bool {
        self.completed_stops == self.total_stops
    }
}

pub fn progress<C>(visit_order: &[PointId], completion: &C) -> Progress
where
    C: CompletionProvider + ?Sized,
{
    let stops = match visit_order.len() {
        0..=2 => &[][..],
        n => &visit_order[1..n - 1],
    };
    Progress {
        current_leg: current_leg(visit_order, completion),
        completed_stops: stops
            .iter()
            .filter(|stop| completion.is_stop_complete(stop))
            .count(),
        total_stops: stops.len(),
    }
}
