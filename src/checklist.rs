//! Categorized shopping list and its checked-off state.
//!
//! The list shape matches what the categorization service returns
//! (`{"categorizedAisles": [{"aisleName", "items"}]}`). This module turns it
//! into routing input (required aisles) and progress input (finished stops).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::{normalize_aisle, PointId, StoreGraph};
use crate::traits::CompletionProvider;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedList {
    pub categorized_aisles: Vec<CategorizedAisle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedAisle {
    pub aisle_name: String,
    pub items: Vec<String>,
}

/// A categorized list plus which items are in the cart.
#[derive(Debug, Clone, Default)]
pub struct Checklist {
    list: CategorizedList,
    checked: HashMap<String, bool>,
}

impl Checklist {
    pub fn new(list: CategorizedList) -> Self {
        Self {
            list,
            checked: HashMap::new(),
        }
    }

    /// Restore checked state keyed by item name.
    pub fn with_checked(mut self, checked: HashMap<String, bool>) -> Self {
        self.checked = checked;
        self
    }

    pub fn list(&self) -> &CategorizedList {
        &self.list
    }

    pub fn set_checked(&mut self, item: &str, checked: bool) {
        self.checked.insert(item.to_string(), checked);
    }

    /// Flip an item and return its new state.
    pub fn toggle(&mut self, item: &str) -> bool {
        let entry = self.checked.entry(item.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn is_checked(&self, item: &str) -> bool {
        self.checked.get(item).copied().unwrap_or(false)
    }

    /// Aisles that still hold at least one item, in list order.
    pub fn required_aisles(&self) -> Vec<&str> {
        self.list
            .categorized_aisles
            .iter()
            .filter(|aisle| !aisle.items.is_empty())
            .map(|aisle| aisle.aisle_name.as_str())
            .collect()
    }

    /// Points to visit for this list; aisles the store lacks are logged
    /// and left out.
    pub fn required_points(&self, graph: &StoreGraph) -> Vec<PointId> {
        let (points, unresolved) = graph.resolve_aisles(self.required_aisles());
        if !unresolved.is_empty() {
            warn!(?unresolved, "aisles without a location in this store");
        }
        points
    }

    /// True when every item listed under `aisle` is checked.
    ///
    /// Aisle names compare case-insensitively. An aisle not on the list
    /// has nothing outstanding.
    pub fn is_aisle_complete(&self, aisle: &str) -> bool {
        let wanted = normalize_aisle(aisle);
        self.list
            .categorized_aisles
            .iter()
            .filter(|entry| normalize_aisle(&entry.aisle_name) == wanted)
            .flat_map(|entry| entry.items.iter())
            .all(|item| self.is_checked(item))
    }

    /// Stop-level view of this checklist for progress tracking.
    pub fn stop_completion<'a>(&'a self, graph: &'a StoreGraph) -> StopCompletion<'a> {
        StopCompletion {
            checklist: self,
            graph,
        }
    }
}

/// A stop is complete once every listed aisle located there is complete.
#[derive(Debug, Clone, Copy)]
pub struct StopCompletion<'a> {
    checklist: &'a Checklist,
    graph: &'a StoreGraph,
}

impl CompletionProvider for StopCompletion<'_> {
    fn is_stop_complete(&self, point: &PointId) -> bool {
        self.checklist
            .list
            .categorized_aisles
            .iter()
            .filter(|aisle| self.graph.resolve_aisle(&aisle.aisle_name) == Some(point))
            .all(|aisle| self.checklist.is_aisle_complete(&aisle.aisle_name))
    }
}
