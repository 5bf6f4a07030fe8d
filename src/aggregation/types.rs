use chrono::{DateTime, Utc};
use serde::Serialize;

use super::temporal::parse_timestamp;
use crate::types::{Coordinates, LocationRecord, NarrativeItem};

/// A narrative item flattened out of its parent record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedItem {
    pub title: String,
    pub publisher: String,
    pub date: Option<String>,
    pub url: String,
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
    pub coordinates: Coordinates,
    pub location_name: String,
    pub venue: Option<String>,
    /// Index of the parent record in the aggregated input.
    pub record_index: usize,
}

impl LocatedItem {
    pub fn new(item: &NarrativeItem, record: &LocationRecord, record_index: usize) -> Self {
        Self {
            title: item.title.clone(),
            publisher: item.publisher.clone(),
            date: item.date.clone(),
            url: item.url.clone(),
            timestamp: item.date.as_deref().and_then(parse_timestamp),
            coordinates: record.location.coordinates,
            location_name: record.location.name.clone(),
            venue: record.location.venue.clone(),
            record_index,
        }
    }

    pub fn coordinate_key(&self) -> String {
        self.coordinates.key()
    }
}

/// All items sharing one exact coordinate key. The first item encountered is the
/// representative; clusters are rebuilt on every aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationCluster {
    pub item: LocatedItem,
    pub news_list: Vec<LocatedItem>,
    pub duplicate_count: usize,
}

impl LocationCluster {
    pub fn new(item: LocatedItem) -> Self {
        Self {
            news_list: vec![item.clone()],
            item,
            duplicate_count: 0,
        }
    }

    pub fn push(&mut self, item: LocatedItem) {
        self.news_list.push(item);
        self.duplicate_count = self.news_list.len() - 1;
    }

    pub fn location_name(&self) -> &str {
        &self.item.location_name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.item.coordinates
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.item.timestamp
    }
}
