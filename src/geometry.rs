//! Projects region geometry out of location records into a renderable feature collection.

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use serde::Serialize;
use tracing::debug;

use crate::style::{resolve, Style};
use crate::types::LocationRecord;
use crate::TARGET_VIEW;

/// Property used to join a clicked feature back to its record.
pub const LOCATION_INDEX_PROPERTY: &str = "locationIndex";

/// Feature collection plus the bookkeeping needed to resolve clicks.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedRegions {
    pub collection: FeatureCollection,
    /// Paint shared by the whole layer, taken from the first geometry-bearing record.
    pub style: Option<Style>,
    /// `record_indices[location_index]` is the position of that record in the input.
    #[serde(skip)]
    record_indices: Vec<usize>,
}

impl Default for ProjectedRegions {
    fn default() -> Self {
        Self {
            collection: FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            },
            style: None,
            record_indices: Vec::new(),
        }
    }
}

impl ProjectedRegions {
    pub fn len(&self) -> usize {
        self.record_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_indices.is_empty()
    }

    pub fn feature(&self, location_index: usize) -> Option<&Feature> {
        self.collection.features.get(location_index)
    }

    /// Map a feature's `locationIndex` back to the index of its record.
    pub fn record_for(&self, location_index: usize) -> Option<usize> {
        self.record_indices.get(location_index).copied()
    }

    /// Read `locationIndex` from a clicked feature and resolve it.
    pub fn record_for_feature(&self, feature: &Feature) -> Option<usize> {
        let index = feature.property(LOCATION_INDEX_PROPERTY)?.as_u64()?;
        self.record_for(usize::try_from(index).ok()?)
    }
}

/// One feature per record with geometry, in input order. Each feature carries its
/// `locationIndex` (position among geometry-bearing records) and its own resolved
/// `color`/`icon`, so a renderer can either use the shared layer style or branch
/// per feature when categories differ.
pub fn project(records: &[LocationRecord], group_id: Option<&str>) -> ProjectedRegions {
    let mut regions = ProjectedRegions::default();

    for (record_index, record) in records.iter().enumerate() {
        let Some(geometry) = record.geometry() else {
            continue;
        };

        let style = resolve(record.category_code(), group_id);
        if regions.style.is_none() {
            regions.style = Some(style);
        }

        let mut properties = JsonObject::new();
        properties.insert(
            LOCATION_INDEX_PROPERTY.to_string(),
            JsonValue::from(regions.record_indices.len()),
        );
        properties.insert("name".to_string(), JsonValue::from(record.location.name.as_str()));
        properties.insert("color".to_string(), JsonValue::from(style.color));
        properties.insert("icon".to_string(), JsonValue::from(style.icon));

        regions.collection.features.push(Feature {
            bbox: None,
            geometry: Some(geometry.clone()),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
        regions.record_indices.push(record_index);
    }

    debug!(
        target: TARGET_VIEW,
        "Projected {} regions from {} records",
        regions.len(),
        records.len()
    );

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Coordinates, Location};
    use geojson::{GeoJson, Geometry, Value};

    fn square() -> GeoJson {
        GeoJson::Geometry(Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]])))
    }

    fn record(name: &str, code: Option<&str>, geojson: Option<GeoJson>) -> LocationRecord {
        LocationRecord {
            location: Location {
                name: name.to_string(),
                venue: None,
                coordinates: Coordinates(0.5, 0.5),
            },
            category: code.map(|c| Category {
                code: Some(c.to_string()),
            }),
            geojson,
            news: None,
            wiki: None,
        }
    }

    #[test]
    fn test_location_index_counts_geometry_records_only() {
        let records = vec![
            record("no-geo-1", None, None),
            record("first", Some("WILDFIRE"), Some(square())),
            record("no-geo-2", None, None),
            record("second", Some("FLOOD"), Some(square())),
        ];

        let regions = project(&records, None);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions.collection.features.len(), 2);

        for (position, feature) in regions.collection.features.iter().enumerate() {
            assert_eq!(
                feature.property(LOCATION_INDEX_PROPERTY),
                Some(&JsonValue::from(position))
            );
        }

        assert_eq!(regions.record_for(0), Some(1));
        assert_eq!(regions.record_for(1), Some(3));
        assert_eq!(regions.record_for(2), None);
        assert_eq!(
            regions.record_for_feature(&regions.collection.features[1]),
            Some(3)
        );
        assert_eq!(
            regions.feature(1).and_then(|f| regions.record_for_feature(f)),
            Some(3)
        );
        assert!(regions.feature(2).is_none());
    }

    #[test]
    fn test_shared_style_comes_from_first_geometry_record() {
        let records = vec![
            record("plain", Some("FLOOD"), None),
            record("fire", Some("WILDFIRE"), Some(square())),
            record("flood", Some("FLOOD"), Some(square())),
        ];

        let regions = project(&records, None);
        assert_eq!(regions.style.map(|s| s.color), Some("#ef4444"));

        // Individual features still carry their own paint.
        assert_eq!(
            regions.collection.features[1].property("color"),
            Some(&JsonValue::from("#0ea5e9"))
        );
    }

    #[test]
    fn test_group_fallback_applies_to_regions() {
        let records = vec![record("stage", None, Some(square()))];
        let regions = project(&records, Some("bts-chronicle"));
        assert_eq!(regions.style.map(|s| s.color), Some("#8b5cf6"));
    }

    #[test]
    fn test_no_geometry_yields_empty_collection() {
        let regions = project(&[record("a", None, None)], None);
        assert!(regions.is_empty());
        assert!(regions.style.is_none());
        assert!(regions.collection.features.is_empty());
    }

    #[test]
    fn test_feature_without_location_index_does_not_resolve() {
        let regions = project(&[record("a", None, Some(square()))], None);
        let stray = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        assert_eq!(regions.record_for_feature(&stray), None);
    }
}
