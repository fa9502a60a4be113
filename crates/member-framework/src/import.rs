//! Import ids for nested resources.
//!
//! A member has no remote id of its own, so an existing element is imported
//! with `<parent_id>/<value>`. Only the first `/` separates the two halves:
//! values are usually URIs and contain slashes themselves.

use crate::error::ResourceError;
use crate::resource::MemberHandle;

pub fn parse_import_id(id: &str) -> Result<MemberHandle, ResourceError> {
    match id.split_once('/') {
        Some((parent_id, value)) if !parent_id.is_empty() && !value.is_empty() => {
            Ok(MemberHandle::new(parent_id, value))
        }
        _ => Err(ResourceError::InvalidImportId(id.to_string())),
    }
}
