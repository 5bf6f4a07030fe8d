//! Wire types for group lists and group detail records.

use geojson::{GeoJson, Geometry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A selectable, named collection of location records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescriptor {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub data_path: String,
    #[serde(default)]
    pub icon: String,
}

/// A `[longitude, latitude]` pair. The order is the wire order and is never swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates(pub f64, pub f64);

impl Coordinates {
    pub fn longitude(&self) -> f64 {
        self.0
    }

    pub fn latitude(&self) -> f64 {
        self.1
    }

    /// Exact-match grouping key. Two items share a location only if their keys are
    /// textually identical; `f64` display is the shortest round-tripping form, so no
    /// precision is lost. Negative zero is written as `0`.
    pub fn key(&self) -> String {
        format!("{},{}", unsigned_zero(self.0), unsigned_zero(self.1))
    }
}

fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub venue: Option<String>,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub code: Option<String>,
}

/// One article or wiki entry attached to a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// One geographic unit of narrative content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub location: Location,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub geojson: Option<GeoJson>,
    #[serde(default)]
    pub news: Option<Vec<NarrativeItem>>,
    #[serde(default)]
    pub wiki: Option<Vec<NarrativeItem>>,
}

impl LocationRecord {
    /// The record's narrative list. "news" wins when both lists are present.
    pub fn narrative(&self) -> &[NarrativeItem] {
        self.news
            .as_deref()
            .or(self.wiki.as_deref())
            .unwrap_or_default()
    }

    pub fn category_code(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.code.as_deref())
    }

    /// The region geometry, if any. A Feature contributes its geometry and a
    /// FeatureCollection contributes the first feature that has one.
    pub fn geometry(&self) -> Option<&Geometry> {
        match self.geojson.as_ref()? {
            GeoJson::Geometry(geometry) => Some(geometry),
            GeoJson::Feature(feature) => feature.geometry.as_ref(),
            GeoJson::FeatureCollection(collection) => collection
                .features
                .iter()
                .find_map(|feature| feature.geometry.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_is_exact() {
        assert_eq!(Coordinates(127.0, 37.5).key(), "127,37.5");
        assert_eq!(Coordinates(-0.1276, 51.5072).key(), "-0.1276,51.5072");
        assert_ne!(
            Coordinates(127.0, 37.5).key(),
            Coordinates(37.5, 127.0).key()
        );
        assert_ne!(
            Coordinates(127.0, 37.5).key(),
            Coordinates(127.000000001, 37.5).key()
        );
    }

    #[test]
    fn test_negative_zero_shares_key_with_zero() {
        assert_eq!(Coordinates(-0.0, 0.0).key(), "0,0");
        assert_eq!(Coordinates(0.0, -0.0).key(), Coordinates(0.0, 0.0).key());
        assert_eq!(Coordinates(-0.5, 0.0).key(), "-0.5,0");
    }

    #[test]
    fn test_record_parsing() {
        let json = r#"{
            "location": {"name": "Seoul", "venue": "Olympic Stadium", "coordinates": [127.0, 37.5]},
            "category": {"code": "CONCERT"},
            "wiki": [{"title": "Tour", "publisher": "Wiki", "date": "2019-06-01", "url": "https://example.com"}]
        }"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.location.coordinates.longitude(), 127.0);
        assert_eq!(record.location.coordinates.latitude(), 37.5);
        assert_eq!(record.category_code(), Some("CONCERT"));
        assert_eq!(record.narrative().len(), 1);
        assert!(record.geometry().is_none());
    }

    #[test]
    fn test_news_takes_precedence_over_wiki() {
        let json = r#"{
            "location": {"name": "Paris", "coordinates": [2.35, 48.85]},
            "news": [{"title": "A"}],
            "wiki": [{"title": "B"}, {"title": "C"}]
        }"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        let titles: Vec<&str> = record.narrative().iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn test_missing_narrative_is_empty() {
        let json = r#"{"location": {"name": "Nowhere", "coordinates": [0.0, 0.0]}}"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert!(record.narrative().is_empty());
        assert_eq!(record.category_code(), None);
    }

    #[test]
    fn test_geometry_from_feature() {
        let json = r#"{
            "location": {"name": "Zone", "coordinates": [1.0, 1.0]},
            "geojson": {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}
            }
        }"#;
        let record: LocationRecord = serde_json::from_str(json).unwrap();
        assert!(record.geometry().is_some());
    }

    #[test]
    fn test_group_descriptor_camel_case() {
        let json = r#"{"id": "bts-chronicle", "title": "BTS", "dataPath": "bts.json"}"#;
        let group: GroupDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(group.data_path, "bts.json");
        assert_eq!(group.icon, "");
        assert_eq!(group.clone(), group);
    }
}
