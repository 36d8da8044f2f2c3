//! Push/pull orchestration.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, warn};
use serde_json::Value;

use super::ownership::OwnershipValidator;
use super::sync_protocol::{
    PullResponse, PushRequest, PushResponse, SyncConflict, SyncMapping, SyncRejection,
    SyncStatusResponse, REASON_FK_VALIDATION, REASON_INVALID_RECORD, REASON_MISSING_SERVER_ID,
    REASON_MISSING_UPDATED_AT, REASON_UNIQUE_VIOLATION,
};
use super::sync_store::{SyncRegistry, UpdateOutcome};
use super::sync_table::SyncTable;
use crate::errors::{DatabaseError, Error, Result};
use crate::utils::{time_utils, wire};

/// Maximum rows returned by a single pull.
pub const SYNC_PAGE_SIZE: i64 = 1000;

/// Trait for the sync engine, the server side of the offline-first
/// protocol.
#[async_trait]
pub trait SyncServiceTrait: Send + Sync {
    /// Applies one table's worth of client changes: creates, then
    /// updates, then deletes, each in client order.
    async fn push(&self, owner_id: i64, request: PushRequest) -> Result<PushResponse>;

    /// Returns every row of `table` owned by the caller whose
    /// `updated_at` is strictly newer than `since`.
    async fn pull(&self, owner_id: i64, table: &str, since: Option<&str>) -> Result<PullResponse>;

    /// Per-table live-row counts for the caller.
    fn status(&self, owner_id: i64) -> Result<SyncStatusResponse>;

    /// Hard-deletes everything the caller owns, children before parents.
    /// Returns the per-table counts of removed rows.
    async fn purge_all(&self, owner_id: i64) -> Result<BTreeMap<&'static str, usize>>;
}

pub struct SyncService {
    registry: Arc<SyncRegistry>,
    validator: OwnershipValidator,
}

impl SyncService {
    pub fn new(registry: Arc<SyncRegistry>) -> Self {
        let validator = OwnershipValidator::new(registry.clone());
        Self {
            registry,
            validator,
        }
    }

    async fn apply_creates(
        &self,
        owner_id: i64,
        table: SyncTable,
        creates: &[Value],
        now: NaiveDateTime,
        response: &mut PushResponse,
    ) -> Result<()> {
        let store = self.registry.store(table);

        for record in creates {
            let local_id = local_id(record);

            let check = self.validator.validate(table, record, owner_id)?;
            if !check.is_valid() {
                response.rejected.push(SyncRejection {
                    local_id,
                    server_id: None,
                    reason: REASON_FK_VALIDATION.to_string(),
                    errors: check.errors,
                });
                continue;
            }

            match store.insert(owner_id, record, now).await {
                Ok(server_id) => response.created.push(SyncMapping {
                    local_id,
                    server_id,
                }),
                Err(err) => {
                    let (reason, errors) = item_rejection(err)?;
                    warn!(
                        "sync push: create on {} rejected for user {}: {}",
                        table,
                        owner_id,
                        errors.join("; ")
                    );
                    response.rejected.push(SyncRejection {
                        local_id,
                        server_id: None,
                        reason,
                        errors,
                    });
                }
            }
        }

        Ok(())
    }

    async fn apply_updates(
        &self,
        owner_id: i64,
        table: SyncTable,
        updates: &[Value],
        now: NaiveDateTime,
        response: &mut PushResponse,
    ) -> Result<()> {
        let store = self.registry.store(table);

        for record in updates {
            let local_id = local_id(record);

            let Some(server_id) = server_id(record) else {
                warn!(
                    "sync push: update on {} without server_id (user {}), skipping",
                    table, owner_id
                );
                response.rejected.push(SyncRejection {
                    local_id,
                    server_id: None,
                    reason: REASON_MISSING_SERVER_ID.to_string(),
                    errors: Vec::new(),
                });
                continue;
            };

            let Some(known_updated_at) = known_updated_at(record) else {
                warn!(
                    "sync push: update on {} id={} without usable updated_at (user {}), skipping",
                    table, server_id, owner_id
                );
                response.rejected.push(SyncRejection {
                    local_id,
                    server_id: Some(server_id),
                    reason: REASON_MISSING_UPDATED_AT.to_string(),
                    errors: Vec::new(),
                });
                continue;
            };

            let check = self.validator.validate(table, record, owner_id)?;
            if !check.is_valid() {
                response.rejected.push(SyncRejection {
                    local_id,
                    server_id: Some(server_id),
                    reason: REASON_FK_VALIDATION.to_string(),
                    errors: check.errors,
                });
                continue;
            }

            match store
                .update_checked(owner_id, server_id, known_updated_at, record, now)
                .await
            {
                Ok(UpdateOutcome::Applied) => response.updated.push(SyncMapping {
                    local_id,
                    server_id,
                }),
                Ok(UpdateOutcome::Conflict(row)) => {
                    debug!(
                        "sync push: conflict on {} id={} for user {}, server wins",
                        table, server_id, owner_id
                    );
                    response.conflicts.push(SyncConflict {
                        local_id,
                        server_id,
                        server_data: row.data,
                    });
                }
                Ok(UpdateOutcome::NotFound) => {
                    // The row may have been removed by another session;
                    // benign, nothing to report to the caller.
                    debug!(
                        "sync push: update target {} id={} missing for user {}, skipping",
                        table, server_id, owner_id
                    );
                }
                Err(err) => {
                    let (reason, errors) = item_rejection(err)?;
                    response.rejected.push(SyncRejection {
                        local_id,
                        server_id: Some(server_id),
                        reason,
                        errors,
                    });
                }
            }
        }

        Ok(())
    }

    async fn apply_deletes(
        &self,
        owner_id: i64,
        table: SyncTable,
        deletes: &[i64],
        now: NaiveDateTime,
    ) -> Result<()> {
        let store = self.registry.store(table);

        for &server_id in deletes {
            if !store.soft_delete(owner_id, server_id, now).await? {
                debug!(
                    "sync push: delete target {} id={} missing for user {}, ignoring",
                    table, server_id, owner_id
                );
            }
        }

        Ok(())
    }
}

#[async_trait]
impl SyncServiceTrait for SyncService {
    async fn push(&self, owner_id: i64, request: PushRequest) -> Result<PushResponse> {
        let table: SyncTable = request.table.parse()?;
        let now = time_utils::now_utc();
        let mut response = PushResponse::new(time_utils::to_rfc3339(now));

        self.apply_creates(owner_id, table, &request.creates, now, &mut response)
            .await?;
        self.apply_updates(owner_id, table, &request.updates, now, &mut response)
            .await?;
        self.apply_deletes(owner_id, table, &request.deletes, now)
            .await?;

        debug!(
            "sync push completed for user {} on {}: {} created, {} updated, {} conflicts, {} rejected, {} deletes",
            owner_id,
            table,
            response.created.len(),
            response.updated.len(),
            response.conflicts.len(),
            response.rejected.len(),
            request.deletes.len()
        );

        Ok(response)
    }

    async fn pull(&self, owner_id: i64, table: &str, since: Option<&str>) -> Result<PullResponse> {
        let table: SyncTable = table.parse()?;
        let since = match since {
            Some(raw) if !raw.is_empty() => Some(time_utils::parse_rfc3339(raw)?),
            _ => None,
        };

        let rows = self
            .registry
            .store(table)
            .changed_since(owner_id, since, SYNC_PAGE_SIZE)?;
        let has_more = rows.len() as i64 >= SYNC_PAGE_SIZE;

        let mut records = Vec::new();
        let mut deleted = Vec::new();
        for row in rows {
            if row.deleted_at.is_some() {
                deleted.push(row.server_id);
            } else {
                records.push(row.data);
            }
        }

        debug!(
            "sync pull completed for user {} on {}: {} records, {} deletions",
            owner_id,
            table,
            records.len(),
            deleted.len()
        );

        Ok(PullResponse {
            records,
            deleted,
            server_timestamp: time_utils::to_rfc3339(time_utils::now_utc()),
            owner_id,
            has_more,
        })
    }

    fn status(&self, owner_id: i64) -> Result<SyncStatusResponse> {
        let mut tables = BTreeMap::new();
        for table in SyncTable::ALL {
            tables.insert(
                table.as_str().to_string(),
                self.registry.store(table).count(owner_id)?,
            );
        }

        Ok(SyncStatusResponse {
            tables,
            supported_tables: SyncTable::ALL
                .iter()
                .map(|table| table.as_str().to_string())
                .collect(),
            server_timestamp: time_utils::to_rfc3339(time_utils::now_utc()),
        })
    }

    async fn purge_all(&self, owner_id: i64) -> Result<BTreeMap<&'static str, usize>> {
        // Children before parents, so the database's own foreign keys
        // never see a dangling reference mid-wipe.
        const WIPE_ORDER: [SyncTable; 6] = [
            SyncTable::Payments,
            SyncTable::Accounts,
            SyncTable::AccountDescriptions,
            SyncTable::PaymentMethods,
            SyncTable::Banks,
            SyncTable::AccountTypes,
        ];

        let mut deleted = BTreeMap::new();
        for table in WIPE_ORDER {
            let removed = self.registry.store(table).purge(owner_id).await?;
            deleted.insert(table.as_str(), removed);
        }

        debug!("user {} data purged: {:?}", owner_id, deleted);
        Ok(deleted)
    }
}

/// Reads a create's provisional identifier: an explicit `localId` wins,
/// then the record's own `id`, which on an unsynced row is still the
/// client-local one.
fn local_id(record: &Value) -> Option<i64> {
    wire::field_id(record, &["localId", "local_id", "id"])
}

/// Reads an update's server-side target identifier.
fn server_id(record: &Value) -> Option<i64> {
    wire::field_id(record, &["server_id", "serverId"])
}

/// Reads the client's last-known `updated_at` from an update record.
fn known_updated_at(record: &Value) -> Option<NaiveDateTime> {
    let object = record.as_object()?;
    let raw = object
        .get("updated_at")
        .or_else(|| object.get("updatedAt"))?
        .as_str()?;
    time_utils::parse_rfc3339(raw).ok()
}

/// Splits item-level failures (reported in `rejected`) from call-level
/// ones (propagated to the caller as a server error).
fn item_rejection(err: Error) -> Result<(String, Vec<String>)> {
    match err {
        Error::Validation(e) => Ok((REASON_INVALID_RECORD.to_string(), vec![e.to_string()])),
        Error::Database(DatabaseError::UniqueViolation(message)) => {
            Ok((REASON_UNIQUE_VIOLATION.to_string(), vec![message]))
        }
        // A referenced row vanished between validation and the write; the
        // database constraint is the backstop and the item just fails.
        Error::Database(DatabaseError::ForeignKeyViolation(message)) => {
            Ok((REASON_FK_VALIDATION.to_string(), vec![message]))
        }
        other => Err(other),
    }
}
