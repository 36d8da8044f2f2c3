//! Wire types for the push/pull protocol.
//!
//! Field names follow the contract the mobile client already speaks:
//! push responses use `serverTimestamp`, pull responses use
//! `server_timestamp`. Both are kept as-is for compatibility.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rejection reason for records that failed foreign-key ownership checks.
pub const REASON_FK_VALIDATION: &str = "FK validation failed";
/// Rejection reason for updates without a server identifier.
pub const REASON_MISSING_SERVER_ID: &str = "missing server_id";
/// Rejection reason for updates without a usable last-known timestamp.
pub const REASON_MISSING_UPDATED_AT: &str = "missing or invalid updated_at";
/// Rejection reason for records the codec could not decode.
pub const REASON_INVALID_RECORD: &str = "invalid record";
/// Rejection reason for records colliding with a unique constraint.
pub const REASON_UNIQUE_VIOLATION: &str = "unique constraint violation";

/// One table's worth of client-side changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushRequest {
    pub table: String,
    /// Full records, optionally carrying a client-local identifier.
    #[serde(default)]
    pub creates: Vec<Value>,
    /// Full records carrying `server_id` and the last-known `updated_at`.
    #[serde(default)]
    pub updates: Vec<Value>,
    /// Server identifiers to soft-delete.
    #[serde(default)]
    pub deletes: Vec<i64>,
}

/// Maps a client's provisional identifier to the server identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncMapping {
    pub local_id: Option<i64>,
    pub server_id: i64,
}

/// An update that lost against a newer server row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConflict {
    pub local_id: Option<i64>,
    pub server_id: i64,
    /// The server's current representation, for local reconciliation.
    pub server_data: Value,
}

/// An item that was not applied, with itemized reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRejection {
    pub local_id: Option<i64>,
    pub server_id: Option<i64>,
    pub reason: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Outcome of one push call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushResponse {
    pub created: Vec<SyncMapping>,
    pub updated: Vec<SyncMapping>,
    pub conflicts: Vec<SyncConflict>,
    pub rejected: Vec<SyncRejection>,
    #[serde(rename = "serverTimestamp")]
    pub server_timestamp: String,
}

impl PushResponse {
    pub fn new(server_timestamp: String) -> Self {
        Self {
            created: Vec::new(),
            updated: Vec::new(),
            conflicts: Vec::new(),
            rejected: Vec::new(),
            server_timestamp,
        }
    }
}

/// Everything that changed for one table since the client's checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullResponse {
    /// Live rows, in client wire shape.
    pub records: Vec<Value>,
    /// Server identifiers of soft-deleted rows.
    pub deleted: Vec<i64>,
    /// The checkpoint the client must persist for its next pull.
    pub server_timestamp: String,
    pub owner_id: i64,
    /// Set when the page-size cap truncated the result; the client should
    /// pull again from the newest timestamp it received.
    pub has_more: bool,
}

/// Per-table summary the client uses to plan its first pull.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatusResponse {
    /// Live-row counts per table for the calling principal.
    pub tables: BTreeMap<String, i64>,
    pub supported_tables: Vec<String>,
    pub server_timestamp: String,
}
