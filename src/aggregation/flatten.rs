use super::types::LocatedItem;
use crate::types::LocationRecord;

/// Flatten every record's narrative list, in record order then item order.
/// Records without narrative items contribute nothing.
pub fn flatten(records: &[LocationRecord]) -> Vec<LocatedItem> {
    records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| {
            record
                .narrative()
                .iter()
                .map(move |item| LocatedItem::new(item, record, index))
        })
        .collect()
}
