//! Composes the renderable scene (markers, regions, list) from a session.

use serde::Serialize;

use crate::aggregation::{display_date, LocatedItem};
use crate::geometry::ProjectedRegions;
use crate::session::{MapSession, UserAction};
use crate::style::Style;
use crate::types::Coordinates;

/// A point marker. Clicking it dispatches `UserAction::SelectRecord(record_index)`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub record_index: usize,
    pub name: String,
    pub coordinates: Coordinates,
    pub style: Style,
    pub selected: bool,
}

impl Marker {
    pub fn on_click(&self) -> UserAction {
        UserAction::SelectRecord(self.record_index)
    }
}

/// One news item inside a list entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub title: String,
    pub publisher: String,
    pub display_date: String,
    pub url: String,
    pub expanded: bool,
}

impl ListItem {
    fn new(item: &LocatedItem, expanded: bool) -> Self {
        Self {
            title: item.title.clone(),
            publisher: item.publisher.clone(),
            display_date: display_date(item.date.as_deref()),
            url: item.url.clone(),
            expanded,
        }
    }

    pub fn on_toggle(&self) -> UserAction {
        UserAction::ToggleExpand(self.title.clone())
    }

    pub fn on_open(&self) -> UserAction {
        UserAction::OpenArticle(self.url.clone())
    }
}

/// One location cluster as shown in the list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub location_name: String,
    pub venue: Option<String>,
    pub coordinates: Coordinates,
    pub headline: ListItem,
    pub duplicate_count: usize,
    pub items: Vec<ListItem>,
}

impl ListEntry {
    pub fn on_view_location(&self) -> UserAction {
        UserAction::ViewLocation(self.coordinates)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub markers: Vec<Marker>,
    pub regions: ProjectedRegions,
    pub list_visible: bool,
    pub selected_location: Option<String>,
    pub list: Vec<ListEntry>,
}

/// Build the scene for the session's current state.
pub fn compose(session: &MapSession) -> Scene {
    let selection = session.selection();
    let selected = selection.selected();

    let markers = session
        .records()
        .iter()
        .enumerate()
        .map(|(index, record)| Marker {
            record_index: index,
            name: record.location.name.clone(),
            coordinates: record.location.coordinates,
            style: session.record_style(record),
            selected: selected == Some(index),
        })
        .collect();

    let list = session
        .visible_clusters()
        .into_iter()
        .map(|cluster| ListEntry {
            location_name: cluster.item.location_name.clone(),
            venue: cluster.item.venue.clone(),
            coordinates: cluster.coordinates(),
            headline: ListItem::new(&cluster.item, selection.is_expanded(&cluster.item.title)),
            duplicate_count: cluster.duplicate_count,
            items: cluster
                .news_list
                .iter()
                .map(|item| ListItem::new(item, selection.is_expanded(&item.title)))
                .collect(),
        })
        .collect();

    Scene {
        markers,
        regions: session.regions().clone(),
        list_visible: selection.list_visible(),
        selected_location: session.selected_record().map(|r| r.location.name.clone()),
        list,
    }
}
