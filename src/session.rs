//! Owner of the active group, its records and derived state, and the selection.
//!
//! Loads are tagged with a generation number when they start. A result is applied
//! only if its generation is still current, so a slow response for a group the user
//! has already left can never overwrite the newer group's data.

use geojson::Feature;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::aggregation::{aggregate, LocationCluster};
use crate::geometry::{project, ProjectedRegions, LOCATION_INDEX_PROPERTY};
use crate::loader::{GroupSource, LoadError};
use crate::selection::{filter_clusters, FlyTo, SelectionState};
use crate::style::{resolve, Style};
use crate::types::{Coordinates, GroupDescriptor, LocationRecord};
use crate::{TARGET_DATA_LOAD, TARGET_VIEW};

/// User interaction coming back from the map or the list.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Marker click, by record index.
    SelectRecord(usize),
    /// Polygon click. The record is found through the feature's `locationIndex`.
    ClickRegion(Feature),
    ShowAll,
    ViewLocation(Coordinates),
    OpenArticle(String),
    ToggleExpand(String),
    ToggleList,
}

/// What the host should do in response to an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FlyTo(FlyTo),
    OpenArticle(Url),
}

/// Identifies one group detail load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub group: GroupDescriptor,
}

#[derive(Debug, Default)]
pub struct MapSession {
    groups: Vec<GroupDescriptor>,
    active_group: Option<GroupDescriptor>,
    generation: u64,
    records: Vec<LocationRecord>,
    clusters: Vec<LocationCluster>,
    regions: ProjectedRegions,
    selection: SelectionState,
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[GroupDescriptor] {
        &self.groups
    }

    pub fn active_group(&self) -> Option<&GroupDescriptor> {
        self.active_group.as_ref()
    }

    pub fn active_group_id(&self) -> Option<&str> {
        self.active_group.as_ref().map(|g| g.id.as_str())
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn clusters(&self) -> &[LocationCluster] {
        &self.clusters
    }

    pub fn regions(&self) -> &ProjectedRegions {
        &self.regions
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_record(&self) -> Option<&LocationRecord> {
        self.selection
            .selected()
            .and_then(|index| self.records.get(index))
    }

    /// Marker style for a record in the active group.
    pub fn record_style(&self, record: &LocationRecord) -> Style {
        resolve(record.category_code(), self.active_group_id())
    }

    /// The list as currently filtered by the selection.
    pub fn visible_clusters(&self) -> Vec<&LocationCluster> {
        let selected_name = self.selected_record().map(|r| r.location.name.as_str());
        filter_clusters(&self.clusters, selected_name)
    }

    /// Apply a group list result. Failures leave an empty list.
    pub fn apply_groups(&mut self, result: Result<Vec<GroupDescriptor>, LoadError>) {
        match result {
            Ok(groups) => {
                info!(target: TARGET_DATA_LOAD, "Loaded {} groups", groups.len());
                self.groups = groups;
            }
            Err(err) => {
                error!(target: TARGET_DATA_LOAD, "Failed to load group list: {}", err);
                self.groups.clear();
            }
        }
    }

    /// Make `group_id` the active group and start a new load generation. Old records
    /// and the selection are dropped immediately.
    pub fn begin_switch(&mut self, group_id: &str) -> Result<LoadTicket, LoadError> {
        let group = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or_else(|| LoadError::UnknownGroup(group_id.to_string()))?;

        self.generation += 1;
        self.active_group = Some(group.clone());
        self.set_records(Vec::new());

        debug!(
            target: TARGET_DATA_LOAD,
            "Switching to group {} (generation {})", group.id, self.generation
        );

        Ok(LoadTicket {
            generation: self.generation,
            group,
        })
    }

    /// Apply a group detail result if its ticket is still current. Returns whether
    /// the result was applied. Failures clear the records.
    pub fn apply_locations(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<LocationRecord>, LoadError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                target: TARGET_DATA_LOAD,
                "Discarding stale response for group {} (generation {}, current {})",
                ticket.group.id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(records) => {
                info!(
                    target: TARGET_DATA_LOAD,
                    "Loaded {} records for group {}",
                    records.len(),
                    ticket.group.id
                );
                self.set_records(records);
            }
            Err(err) => {
                warn!(
                    target: TARGET_DATA_LOAD,
                    "Failed to load group {}: {}", ticket.group.id, err
                );
                self.set_records(Vec::new());
            }
        }
        true
    }

    /// Replace the records wholesale and rebuild everything derived from them.
    fn set_records(&mut self, records: Vec<LocationRecord>) {
        self.clusters = aggregate(&records);
        self.regions = project(&records, self.active_group_id());
        self.records = records;
        self.selection = SelectionState::default();
    }

    /// Translate a user action into state changes and an optional effect.
    pub fn handle(&mut self, action: UserAction) -> Option<Effect> {
        match action {
            UserAction::SelectRecord(index) => self.select_record(index),
            UserAction::ClickRegion(feature) => match self.regions.record_for_feature(&feature) {
                Some(index) => self.select_record(index),
                None => {
                    warn!(
                        target: TARGET_VIEW,
                        "Clicked feature has no known locationIndex: {:?}",
                        feature.property(LOCATION_INDEX_PROPERTY)
                    );
                    None
                }
            },
            UserAction::ShowAll => {
                self.selection.clear();
                None
            }
            UserAction::ViewLocation(coordinates) => {
                Some(Effect::FlyTo(self.selection.view_item(coordinates)))
            }
            UserAction::OpenArticle(raw) => match Url::parse(&raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    Some(Effect::OpenArticle(url))
                }
                _ => {
                    warn!(target: TARGET_VIEW, "Refusing to open article URL '{}'", raw);
                    None
                }
            },
            UserAction::ToggleExpand(title) => {
                self.selection.toggle_expanded(&title);
                None
            }
            UserAction::ToggleList => {
                self.selection.toggle_list();
                None
            }
        }
    }

    /// Collapse the given items, e.g. from startup configuration. Titles listed more
    /// than once stay collapsed.
    pub fn collapse_items<I, T>(&mut self, titles: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for title in titles {
            self.selection.collapse(title.as_ref());
        }
    }

    fn select_record(&mut self, index: usize) -> Option<Effect> {
        let Some(coordinates) = self.records.get(index).map(|r| r.location.coordinates) else {
            warn!(target: TARGET_VIEW, "No record at index {}", index);
            return None;
        };
        Some(Effect::FlyTo(self.selection.select(index, coordinates)))
    }
}

/// Fetch the group list and apply it.
pub async fn refresh_groups<S: GroupSource>(session: &Mutex<MapSession>, source: &S) {
    let result = source.fetch_groups().await;
    session.lock().await.apply_groups(result);
}

/// Switch to a group and load its records. The lock is not held while fetching;
/// returns whether this load's result was applied.
pub async fn switch_group<S: GroupSource>(
    session: &Mutex<MapSession>,
    source: &S,
    group_id: &str,
) -> Result<bool, LoadError> {
    let ticket = session.lock().await.begin_switch(group_id)?;
    let result = source.fetch_locations(&ticket.group).await;
    Ok(session.lock().await.apply_locations(&ticket, result))
}
