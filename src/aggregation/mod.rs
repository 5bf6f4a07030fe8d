//! Location aggregation: flatten narrative items, group them by exact coordinates
//! and order the resulting clusters by recency.

pub mod flatten;
pub mod grouping;
pub mod temporal;
pub mod types;

pub use flatten::flatten;
pub use grouping::{group_by_coordinates, sort_by_recency};
pub use temporal::{display_date, parse_timestamp};
pub use types::*;

use tracing::debug;

use crate::types::LocationRecord;
use crate::TARGET_VIEW;

/// Build the sorted cluster list for a set of records.
pub fn aggregate(records: &[LocationRecord]) -> Vec<LocationCluster> {
    let items = flatten(records);
    let item_count = items.len();
    let mut clusters = group_by_coordinates(items);
    sort_by_recency(&mut clusters);

    debug!(
        target: TARGET_VIEW,
        "Aggregated {} records into {} clusters ({} items)",
        records.len(),
        clusters.len(),
        item_count
    );

    clusters
}
