//! # Operation Results
//!
//! Result shapes reported back for store operations, serialized camelCase to
//! mirror the reference driver's wire format.

use serde::Serialize;

use super::object_id::ObjectId;

/// Result of `insert_one`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: ObjectId,
}

impl InsertOneResult {
    pub fn new(inserted_id: ObjectId) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Result of `update_one`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
        }
    }
}

/// Result of `delete_one`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
