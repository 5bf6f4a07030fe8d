//! Body parsing for group lists and group detail responses.

use super::types::LoadError;
use crate::types::{GroupDescriptor, LocationRecord};

/// Parse a group list body.
pub fn parse_group_list(body: &str) -> Result<Vec<GroupDescriptor>, LoadError> {
    if body.trim().is_empty() {
        return Err(LoadError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}

/// Parse a group detail body. An empty body is an error in its own right and is
/// never handed to the JSON parser; `[]` is a valid, empty group.
pub fn parse_location_records(body: &str) -> Result<Vec<LocationRecord>, LoadError> {
    if body.trim().is_empty() {
        return Err(LoadError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}
