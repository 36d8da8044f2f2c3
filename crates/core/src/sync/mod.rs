//! Offline-first synchronization engine.
//!
//! The client keeps a full local copy of its data and reconciles it with
//! the server through two operations: *push* (apply local creates,
//! updates and deletes) and *pull* (fetch everything that changed since
//! a checkpoint). Both work per table, are idempotent under retries, and
//! resolve update races server-wins using the stored `updated_at` clock.

mod ownership;
mod sync_protocol;
mod sync_service;
mod sync_store;
mod sync_table;

pub use ownership::{FkValidation, ForeignKeyField, OwnershipValidator};
pub use sync_protocol::{
    PullResponse, PushRequest, PushResponse, SyncConflict, SyncMapping, SyncRejection,
    SyncStatusResponse, REASON_FK_VALIDATION, REASON_INVALID_RECORD, REASON_MISSING_SERVER_ID,
    REASON_MISSING_UPDATED_AT, REASON_UNIQUE_VIOLATION,
};
pub use sync_service::{SyncService, SyncServiceTrait, SYNC_PAGE_SIZE};
pub use sync_store::{SyncRegistry, SyncRow, SyncStoreTrait, UpdateOutcome};
pub use sync_table::SyncTable;

#[cfg(test)]
mod tests;
