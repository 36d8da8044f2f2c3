//! Owner-scoped persistence boundary for sync tables.
//!
//! Every operation takes the authenticated owner and filters by it at
//! the storage layer; nothing here can touch another principal's rows.
//! The one deliberate exception is [`SyncStoreTrait::owner_of`], which
//! resolves who owns a live row so the ownership validator can tell
//! "does not exist" apart from "belongs to someone else".

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::Value;

use super::sync_table::SyncTable;
use crate::errors::Result;

/// A stored row in client wire shape, plus the bookkeeping columns the
/// engine needs for conflict detection and pull partitioning.
#[derive(Debug, Clone)]
pub struct SyncRow {
    pub server_id: i64,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    /// Full record as produced by the entity codec.
    pub data: Value,
}

/// Outcome of a checked update. The conflict test and the write happen
/// as one guarded step inside the store.
#[derive(Debug)]
pub enum UpdateOutcome {
    Applied,
    /// The stored row was newer; it is returned untouched.
    Conflict(SyncRow),
    NotFound,
}

/// Persistence operations one sync table must support.
#[async_trait]
pub trait SyncStoreTrait: Send + Sync {
    /// Decodes a client record, stamps it, and persists it for the owner.
    /// Returns the server-assigned identifier.
    async fn insert(&self, owner_id: i64, record: &Value, now: NaiveDateTime) -> Result<i64>;

    /// Applies a client update unless the stored row's `updated_at` is
    /// strictly newer than `known_updated_at`. Looks the row up scoped to
    /// `(server_id, owner_id)`, soft-deleted rows included.
    async fn update_checked(
        &self,
        owner_id: i64,
        server_id: i64,
        known_updated_at: NaiveDateTime,
        record: &Value,
        now: NaiveDateTime,
    ) -> Result<UpdateOutcome>;

    /// Marks the row deleted, stamping `deleted_at` and `updated_at`.
    /// Returns false when no live row matched.
    async fn soft_delete(&self, owner_id: i64, server_id: i64, now: NaiveDateTime)
        -> Result<bool>;

    /// Rows for the owner with `updated_at` strictly after `since`
    /// (all rows when `since` is `None`), soft-deleted included, ordered
    /// by `(updated_at, id)` ascending and capped at `limit`.
    fn changed_since(
        &self,
        owner_id: i64,
        since: Option<NaiveDateTime>,
        limit: i64,
    ) -> Result<Vec<SyncRow>>;

    /// Owner of the live row with this identifier, if any.
    fn owner_of(&self, server_id: i64) -> Result<Option<i64>>;

    /// Number of live rows the owner has in this table.
    fn count(&self, owner_id: i64) -> Result<i64>;

    /// Hard-deletes every row the owner has in this table. Used only by
    /// the account-wide data wipe; sync itself never hard-deletes.
    async fn purge(&self, owner_id: i64) -> Result<usize>;
}

/// Compile-time wiring of each sync table to its store.
///
/// A struct with one field per table (instead of a map keyed by name)
/// so forgetting a table fails to build.
pub struct SyncRegistry {
    pub account_types: Arc<dyn SyncStoreTrait>,
    pub account_descriptions: Arc<dyn SyncStoreTrait>,
    pub accounts: Arc<dyn SyncStoreTrait>,
    pub payment_methods: Arc<dyn SyncStoreTrait>,
    pub banks: Arc<dyn SyncStoreTrait>,
    pub payments: Arc<dyn SyncStoreTrait>,
}

impl SyncRegistry {
    pub fn store(&self, table: SyncTable) -> &dyn SyncStoreTrait {
        match table {
            SyncTable::AccountTypes => self.account_types.as_ref(),
            SyncTable::AccountDescriptions => self.account_descriptions.as_ref(),
            SyncTable::Accounts => self.accounts.as_ref(),
            SyncTable::PaymentMethods => self.payment_methods.as_ref(),
            SyncTable::Banks => self.banks.as_ref(),
            SyncTable::Payments => self.payments.as_ref(),
        }
    }
}
