//! Selection state shared by the map and the news list.

use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::aggregation::LocationCluster;
use crate::types::Coordinates;
use crate::TARGET_VIEW;

/// Zoom used when a whole location is selected from the map.
pub const LOCATION_ZOOM: f64 = 5.0;
pub const LOCATION_FLY_DURATION_MS: u64 = 2000;
/// Closer zoom used when a single list item is located.
pub const ITEM_ZOOM: f64 = 12.0;
pub const ITEM_FLY_DURATION_MS: u64 = 1500;

/// Viewport command for the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyTo {
    pub center: Coordinates,
    pub zoom: f64,
    pub duration_ms: u64,
}

impl FlyTo {
    pub fn to_location(center: Coordinates) -> Self {
        Self {
            center,
            zoom: LOCATION_ZOOM,
            duration_ms: LOCATION_FLY_DURATION_MS,
        }
    }

    pub fn to_item(center: Coordinates) -> Self {
        Self {
            center,
            zoom: ITEM_ZOOM,
            duration_ms: ITEM_FLY_DURATION_MS,
        }
    }
}

/// Per-item expand/collapse flags keyed by item title. Items are expanded unless
/// their title is in the collapsed set, so nothing is stored for the common case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    collapsed: HashSet<String>,
}

impl ExpandState {
    pub fn is_expanded(&self, title: &str) -> bool {
        !self.collapsed.contains(title)
    }

    /// Flip one item and return its new state.
    pub fn toggle(&mut self, title: &str) -> bool {
        if self.collapsed.remove(title) {
            true
        } else {
            self.collapsed.insert(title.to_string());
            false
        }
    }

    /// Collapse one item. Unlike `toggle`, repeating it keeps the item collapsed.
    pub fn collapse(&mut self, title: &str) {
        self.collapsed.insert(title.to_string());
    }

    pub fn collapsed_count(&self) -> usize {
        self.collapsed.len()
    }
}

/// The active location (by record index), list visibility and expand flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    selected: Option<usize>,
    list_visible: bool,
    expand: ExpandState,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected: None,
            list_visible: true,
            expand: ExpandState::default(),
        }
    }
}

impl SelectionState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn expand(&self) -> &ExpandState {
        &self.expand
    }

    /// Marker or polygon click. Shows the list and flies to the location.
    pub fn select(&mut self, record_index: usize, coordinates: Coordinates) -> FlyTo {
        debug!(target: TARGET_VIEW, "Selecting record {} at {}", record_index, coordinates);
        self.selected = Some(record_index);
        self.list_visible = true;
        FlyTo::to_location(coordinates)
    }

    /// "Show all": drops the selection, leaves visibility alone.
    pub fn clear(&mut self) {
        debug!(target: TARGET_VIEW, "Clearing selection");
        self.selected = None;
    }

    /// "View location" on a list item. Selection and filter are unchanged.
    pub fn view_item(&self, coordinates: Coordinates) -> FlyTo {
        FlyTo::to_item(coordinates)
    }

    pub fn toggle_list(&mut self) -> bool {
        self.list_visible = !self.list_visible;
        debug!(target: TARGET_VIEW, "List visible: {}", self.list_visible);
        self.list_visible
    }

    pub fn toggle_expanded(&mut self, title: &str) -> bool {
        self.expand.toggle(title)
    }

    pub fn collapse(&mut self, title: &str) {
        self.expand.collapse(title);
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expand.is_expanded(title)
    }
}

/// Clusters to show in the list: all of them, or only those whose location name
/// matches the selected location.
pub fn filter_clusters<'a>(
    clusters: &'a [LocationCluster],
    selected_location: Option<&str>,
) -> Vec<&'a LocationCluster> {
    match selected_location {
        Some(name) => clusters
            .iter()
            .filter(|cluster| cluster.location_name() == name)
            .collect(),
        None => clusters.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::types::{Location, LocationRecord, NarrativeItem};

    #[test]
    fn test_initial_state() {
        let state = SelectionState::default();
        assert_eq!(state.selected(), None);
        assert!(state.list_visible());
        assert!(state.is_expanded("anything"));
        assert_eq!(state.expand().collapsed_count(), 0);
    }

    #[test]
    fn test_select_forces_list_visible() {
        let mut state = SelectionState::default();
        state.toggle_list();
        assert!(!state.list_visible());

        let fly = state.select(3, Coordinates(127.0, 37.5));
        assert_eq!(state.selected(), Some(3));
        assert!(state.list_visible());
        assert_eq!(fly.center, Coordinates(127.0, 37.5));
        assert_eq!(fly.zoom, 5.0);
        assert_eq!(fly.duration_ms, 2000);
    }

    #[test]
    fn test_list_can_be_hidden_while_selected() {
        let mut state = SelectionState::default();
        state.select(0, Coordinates(0.0, 0.0));
        assert!(!state.toggle_list());
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_clear_keeps_visibility() {
        let mut state = SelectionState::default();
        state.select(1, Coordinates(1.0, 1.0));
        state.toggle_list();
        state.clear();
        assert_eq!(state.selected(), None);
        assert!(!state.list_visible());
    }

    #[test]
    fn test_view_item_zooms_closer_without_selecting() {
        let mut state = SelectionState::default();
        state.select(2, Coordinates(1.0, 1.0));
        let fly = state.view_item(Coordinates(2.0, 3.0));
        assert_eq!(fly.zoom, 12.0);
        assert_eq!(fly.duration_ms, 1500);
        assert_eq!(fly.center, Coordinates(2.0, 3.0));
        assert_eq!(state.selected(), Some(2));
    }

    #[test]
    fn test_expand_defaults_open_and_toggles() {
        let mut expand = ExpandState::default();
        assert!(expand.is_expanded("story"));
        assert!(!expand.toggle("story"));
        assert!(!expand.is_expanded("story"));
        assert!(expand.is_expanded("other"));
        assert!(expand.toggle("story"));
        assert!(expand.is_expanded("story"));
        assert_eq!(expand.collapsed_count(), 0);
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let mut expand = ExpandState::default();
        expand.collapse("story");
        expand.collapse("story");
        assert!(!expand.is_expanded("story"));
        assert_eq!(expand.collapsed_count(), 1);
        assert!(expand.toggle("story"));
    }

    #[test]
    fn test_filter_by_location_name() {
        let records: Vec<LocationRecord> = [("Seoul", 1.0), ("Busan", 2.0), ("Seoul", 3.0)]
            .iter()
            .map(|(name, x)| LocationRecord {
                location: Location {
                    name: name.to_string(),
                    venue: None,
                    coordinates: Coordinates(*x, *x),
                },
                category: None,
                geojson: None,
                news: Some(vec![NarrativeItem {
                    title: format!("{}-{}", name, x),
                    publisher: String::new(),
                    date: None,
                    url: String::new(),
                }]),
                wiki: None,
            })
            .collect();
        let clusters = aggregate(&records);

        assert_eq!(filter_clusters(&clusters, None).len(), 3);
        let seoul = filter_clusters(&clusters, Some("Seoul"));
        assert_eq!(seoul.len(), 2);
        assert!(seoul.iter().all(|c| c.location_name() == "Seoul"));
        assert!(filter_clusters(&clusters, Some("Tokyo")).is_empty());
    }
}
