use std::collections::HashMap;

use super::types::{LocatedItem, LocationCluster};

/// Group items by exact coordinate key, keeping first-encounter order.
pub fn group_by_coordinates(items: Vec<LocatedItem>) -> Vec<LocationCluster> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut clusters: Vec<LocationCluster> = Vec::new();

    for item in items {
        let key = item.coordinate_key();
        match positions.get(&key) {
            Some(&position) => clusters[position].push(item),
            None => {
                positions.insert(key, clusters.len());
                clusters.push(LocationCluster::new(item));
            }
        }
    }

    clusters
}

/// Newest first. `sort_by` is stable so equal dates keep encounter order, and
/// `None` compares lowest so undated clusters end up last.
pub fn sort_by_recency(clusters: &mut [LocationCluster]) {
    clusters.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
}
