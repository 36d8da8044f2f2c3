//! Engine tests over an in-memory store registry.
//!
//! The memory store mirrors the storage contract closely enough to
//! exercise the push/pull logic without a database: owner scoping,
//! soft deletes, the checked update, and (for `account_types`) the
//! live-name unique constraint.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::{json, Map, Value};

use super::*;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::utils::time_utils;

#[derive(Clone)]
struct MemoryRow {
    owner_id: i64,
    updated_at: NaiveDateTime,
    deleted_at: Option<NaiveDateTime>,
    data: Map<String, Value>,
}

struct MemoryStore {
    table: SyncTable,
    state: Mutex<(i64, BTreeMap<i64, MemoryRow>)>,
}

impl MemoryStore {
    fn new(table: SyncTable) -> Arc<Self> {
        Arc::new(Self {
            table,
            state: Mutex::new((0, BTreeMap::new())),
        })
    }

    fn business_fields(record: &Value) -> Result<Map<String, Value>> {
        let mut fields = record
            .as_object()
            .cloned()
            .ok_or_else(|| ValidationError::InvalidRecord("expected an object".to_string()))?;
        for key in [
            "id",
            "localId",
            "local_id",
            "server_id",
            "serverId",
            "updated_at",
            "updatedAt",
            "deleted_at",
            "deletedAt",
        ] {
            fields.remove(key);
        }
        Ok(fields)
    }

    fn to_sync_row(server_id: i64, row: &MemoryRow) -> SyncRow {
        let mut data = row.data.clone();
        data.insert("id".to_string(), json!(server_id));
        data.insert(
            "updatedAt".to_string(),
            json!(time_utils::to_rfc3339(row.updated_at)),
        );
        data.insert(
            "deletedAt".to_string(),
            row.deleted_at
                .map(|ts| json!(time_utils::to_rfc3339(ts)))
                .unwrap_or(Value::Null),
        );
        SyncRow {
            server_id,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            data: Value::Object(data),
        }
    }

}

#[async_trait]
impl SyncStoreTrait for MemoryStore {
    async fn insert(&self, owner_id: i64, record: &Value, now: NaiveDateTime) -> Result<i64> {
        let fields = Self::business_fields(record)?;
        let mut state = self.state.lock().unwrap();

        // account_types carries a live unique (user_id, name) index.
        if self.table == SyncTable::AccountTypes {
            if let Some(name) = fields.get("name") {
                let duplicate = state.1.values().any(|row| {
                    row.owner_id == owner_id
                        && row.deleted_at.is_none()
                        && row.data.get("name") == Some(name)
                });
                if duplicate {
                    return Err(DatabaseError::UniqueViolation(format!(
                        "account_types name {name} already exists"
                    ))
                    .into());
                }
            }
        }

        state.0 += 1;
        let server_id = state.0;
        state.1.insert(
            server_id,
            MemoryRow {
                owner_id,
                updated_at: now,
                deleted_at: None,
                data: fields,
            },
        );
        Ok(server_id)
    }

    async fn update_checked(
        &self,
        owner_id: i64,
        server_id: i64,
        known_updated_at: NaiveDateTime,
        record: &Value,
        now: NaiveDateTime,
    ) -> Result<UpdateOutcome> {
        let fields = Self::business_fields(record)?;
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.1.get_mut(&server_id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        if row.owner_id != owner_id {
            return Ok(UpdateOutcome::NotFound);
        }
        if row.updated_at > known_updated_at {
            return Ok(UpdateOutcome::Conflict(Self::to_sync_row(server_id, row)));
        }
        row.data = fields;
        row.updated_at = now;
        Ok(UpdateOutcome::Applied)
    }

    async fn soft_delete(
        &self,
        owner_id: i64,
        server_id: i64,
        now: NaiveDateTime,
    ) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.1.get_mut(&server_id) else {
            return Ok(false);
        };
        if row.owner_id != owner_id || row.deleted_at.is_some() {
            return Ok(false);
        }
        row.deleted_at = Some(now);
        row.updated_at = now;
        Ok(true)
    }

    fn changed_since(
        &self,
        owner_id: i64,
        since: Option<NaiveDateTime>,
        limit: i64,
    ) -> Result<Vec<SyncRow>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<SyncRow> = state
            .1
            .iter()
            .filter(|(_, row)| row.owner_id == owner_id)
            .filter(|(_, row)| since.map_or(true, |ts| row.updated_at > ts))
            .map(|(&server_id, row)| Self::to_sync_row(server_id, row))
            .collect();
        rows.sort_by_key(|row| (row.updated_at, row.server_id));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    fn owner_of(&self, server_id: i64) -> Result<Option<i64>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .1
            .get(&server_id)
            .filter(|row| row.deleted_at.is_none())
            .map(|row| row.owner_id))
    }

    fn count(&self, owner_id: i64) -> Result<i64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .1
            .values()
            .filter(|row| row.owner_id == owner_id && row.deleted_at.is_none())
            .count() as i64)
    }

    async fn purge(&self, owner_id: i64) -> Result<usize> {
        let mut state = self.state.lock().unwrap();
        let before = state.1.len();
        state.1.retain(|_, row| row.owner_id != owner_id);
        Ok(before - state.1.len())
    }
}

struct Fixture {
    service: SyncService,
    registry: Arc<SyncRegistry>,
}

fn fixture() -> Fixture {
    let registry = Arc::new(SyncRegistry {
        account_types: MemoryStore::new(SyncTable::AccountTypes),
        account_descriptions: MemoryStore::new(SyncTable::AccountDescriptions),
        accounts: MemoryStore::new(SyncTable::Accounts),
        payment_methods: MemoryStore::new(SyncTable::PaymentMethods),
        banks: MemoryStore::new(SyncTable::Banks),
        payments: MemoryStore::new(SyncTable::Payments),
    });
    Fixture {
        service: SyncService::new(registry.clone()),
        registry,
    }
}

fn push_request(table: SyncTable, creates: Vec<Value>, updates: Vec<Value>, deletes: Vec<i64>) -> PushRequest {
    PushRequest {
        table: table.as_str().to_string(),
        creates,
        updates,
        deletes,
    }
}

async fn seed(fixture: &Fixture, table: SyncTable, owner_id: i64, record: Value) -> i64 {
    fixture
        .registry
        .store(table)
        .insert(owner_id, &record, time_utils::now_utc())
        .await
        .unwrap()
}

const USER: i64 = 1;
const OTHER_USER: i64 = 2;

#[tokio::test]
async fn push_create_maps_local_to_server_ids() {
    let fx = fixture();
    let request = push_request(
        SyncTable::AccountTypes,
        vec![
            json!({"localId": 7, "name": "Moradia", "logo": "🏠"}),
            json!({"id": 8, "name": "Saúde"}),
        ],
        vec![],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert_eq!(response.created.len(), 2);
    assert_eq!(response.created[0].local_id, Some(7));
    assert_eq!(response.created[1].local_id, Some(8));
    assert_ne!(response.created[0].server_id, response.created[1].server_id);
    assert!(response.rejected.is_empty());
    assert!(response.conflicts.is_empty());
}

#[tokio::test]
async fn push_create_rejects_cross_tenant_foreign_key() {
    let fx = fixture();
    let foreign_type = seed(
        &fx,
        SyncTable::AccountTypes,
        OTHER_USER,
        json!({"name": "Consumo"}),
    )
    .await;

    let request = push_request(
        SyncTable::Accounts,
        vec![json!({
            "localId": 3,
            "description": "Netflix",
            "typeId": foreign_type,
            "value": 55.90,
            "dueDay": 15
        })],
        vec![],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert!(response.created.is_empty());
    assert_eq!(response.rejected.len(), 1);
    let rejection = &response.rejected[0];
    assert_eq!(rejection.local_id, Some(3));
    assert_eq!(rejection.reason, REASON_FK_VALIDATION);
    assert!(rejection.errors[0].contains("does not belong to user"));
    // Nothing was stored for the attacker.
    assert_eq!(fx.registry.store(SyncTable::Accounts).count(USER).unwrap(), 0);
}

#[tokio::test]
async fn push_create_accumulates_all_foreign_key_errors() {
    let fx = fixture();
    let request = push_request(
        SyncTable::Accounts,
        vec![json!({
            "description": "Aluguel",
            "typeId": 404,
            "categoryId": 405,
            "dueDay": 5
        })],
        vec![],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert_eq!(response.rejected.len(), 1);
    let errors = &response.rejected[0].errors;
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("account_types id=404 not found"));
    assert!(errors[1].contains("account_descriptions id=405 not found"));
}

#[tokio::test]
async fn push_create_duplicate_name_is_rejected_not_duplicated() {
    let fx = fixture();
    let first = push_request(
        SyncTable::AccountTypes,
        vec![json!({"localId": 1, "name": "Educação"})],
        vec![],
        vec![],
    );
    fx.service.push(USER, first.clone()).await.unwrap();

    // A client retrying the same create (e.g. after a dropped response)
    // hits the live unique index instead of duplicating the row.
    let response = fx.service.push(USER, first).await.unwrap();

    assert!(response.created.is_empty());
    assert_eq!(response.rejected.len(), 1);
    assert_eq!(response.rejected[0].reason, REASON_UNIQUE_VIOLATION);
    assert_eq!(
        fx.registry
            .store(SyncTable::AccountTypes)
            .count(USER)
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn push_update_applies_with_fresh_timestamp() {
    let fx = fixture();
    let create = push_request(
        SyncTable::AccountTypes,
        vec![json!({"localId": 5, "name": "Lazer"})],
        vec![],
        vec![],
    );
    let created = fx.service.push(USER, create).await.unwrap();
    let server_id = created.created[0].server_id;

    let pulled = fx
        .service
        .pull(USER, "account_types", None)
        .await
        .unwrap();
    let known = pulled.records[0]["updatedAt"].as_str().unwrap().to_string();

    let update = push_request(
        SyncTable::AccountTypes,
        vec![],
        vec![json!({
            "server_id": server_id,
            "updated_at": known,
            "name": "Lazer e viagens"
        })],
        vec![],
    );
    let response = fx.service.push(USER, update).await.unwrap();

    assert_eq!(
        response.updated,
        vec![SyncMapping {
            local_id: None,
            server_id
        }]
    );
    let store = fx.registry.store(SyncTable::AccountTypes);
    let rows = store.changed_since(USER, None, 10).unwrap();
    assert_eq!(rows[0].data["name"], "Lazer e viagens");
}

#[tokio::test]
async fn push_update_conflict_keeps_server_state() {
    let fx = fixture();
    let server_id = seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "Saúde"})).await;

    let stale = "2020-01-01T00:00:00.000Z";
    let update = push_request(
        SyncTable::AccountTypes,
        vec![],
        vec![json!({
            "localId": 12,
            "server_id": server_id,
            "updated_at": stale,
            "name": "Hacked"
        })],
        vec![],
    );
    let response = fx.service.push(USER, update).await.unwrap();

    assert!(response.updated.is_empty());
    assert_eq!(response.conflicts.len(), 1);
    let conflict = &response.conflicts[0];
    assert_eq!(conflict.local_id, Some(12));
    assert_eq!(conflict.server_id, server_id);
    assert_eq!(conflict.server_data["name"], "Saúde");

    let rows = fx
        .registry
        .store(SyncTable::AccountTypes)
        .changed_since(USER, None, 10)
        .unwrap();
    assert_eq!(rows[0].data["name"], "Saúde");
}

#[tokio::test]
async fn resubmitted_update_converges_to_same_state() {
    let fx = fixture();
    // Seed well in the past so the first applied update is guaranteed to
    // move the stored clock forward.
    let seeded_at = time_utils::parse_rfc3339("2026-01-01T00:00:00.000Z").unwrap();
    let server_id = fx
        .registry
        .store(SyncTable::AccountTypes)
        .insert(USER, &json!({"name": "Contas"}), seeded_at)
        .await
        .unwrap();

    let pulled = fx.service.pull(USER, "account_types", None).await.unwrap();
    let known = pulled.records[0]["updatedAt"].as_str().unwrap().to_string();
    let payload = json!({
        "server_id": server_id,
        "updated_at": known,
        "name": "Contas fixas"
    });

    let first = fx
        .service
        .push(
            USER,
            push_request(SyncTable::AccountTypes, vec![], vec![payload.clone()], vec![]),
        )
        .await
        .unwrap();
    assert_eq!(first.updated.len(), 1);

    // The retry carries the same stale timestamp, so the server reports a
    // conflict with its (already updated) state and changes nothing.
    let second = fx
        .service
        .push(
            USER,
            push_request(SyncTable::AccountTypes, vec![], vec![payload], vec![]),
        )
        .await
        .unwrap();
    assert!(second.updated.is_empty());
    assert_eq!(second.conflicts.len(), 1);
    assert_eq!(second.conflicts[0].server_data["name"], "Contas fixas");

    let rows = fx
        .registry
        .store(SyncTable::AccountTypes)
        .changed_since(USER, None, 10)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].data["name"], "Contas fixas");
}

#[tokio::test]
async fn push_update_without_server_id_is_rejected() {
    let fx = fixture();
    let request = push_request(
        SyncTable::AccountTypes,
        vec![],
        vec![json!({"localId": 9, "updated_at": "2026-01-01T00:00:00.000Z", "name": "X"})],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert_eq!(response.rejected.len(), 1);
    assert_eq!(response.rejected[0].reason, REASON_MISSING_SERVER_ID);
    assert_eq!(response.rejected[0].local_id, Some(9));
}

#[tokio::test]
async fn push_update_with_bad_timestamp_is_rejected() {
    let fx = fixture();
    let server_id = seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "Y"})).await;
    let request = push_request(
        SyncTable::AccountTypes,
        vec![],
        vec![json!({"server_id": server_id, "updated_at": "yesterday", "name": "Z"})],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert_eq!(response.rejected.len(), 1);
    assert_eq!(response.rejected[0].reason, REASON_MISSING_UPDATED_AT);
}

#[tokio::test]
async fn push_update_of_missing_row_is_silently_skipped() {
    let fx = fixture();
    let request = push_request(
        SyncTable::AccountTypes,
        vec![],
        vec![json!({
            "server_id": 999,
            "updated_at": "2026-01-01T00:00:00.000Z",
            "name": "Ghost"
        })],
        vec![],
    );

    let response = fx.service.push(USER, request).await.unwrap();

    assert!(response.updated.is_empty());
    assert!(response.conflicts.is_empty());
    assert!(response.rejected.is_empty());
}

#[tokio::test]
async fn push_delete_soft_deletes_and_tolerates_retries() {
    let fx = fixture();
    let server_id = seed(&fx, SyncTable::Banks, USER, json!({"code": 1, "name": "BB", "agency": "1", "account": "2"})).await;

    let delete = push_request(SyncTable::Banks, vec![], vec![], vec![server_id, 424242]);
    fx.service.push(USER, delete.clone()).await.unwrap();

    let pulled = fx.service.pull(USER, "banks", None).await.unwrap();
    assert!(pulled.records.is_empty());
    assert_eq!(pulled.deleted, vec![server_id]);

    // Replaying the delete batch changes nothing.
    fx.service.push(USER, delete).await.unwrap();
    let again = fx.service.pull(USER, "banks", None).await.unwrap();
    assert_eq!(again.deleted, vec![server_id]);
}

#[tokio::test]
async fn pull_honors_the_checkpoint() {
    let fx = fixture();
    let store = fx.registry.store(SyncTable::AccountTypes);
    let early = time_utils::parse_rfc3339("2026-01-01T00:00:00.000Z").unwrap();
    let late = time_utils::parse_rfc3339("2026-02-01T00:00:00.000Z").unwrap();
    store.insert(USER, &json!({"name": "Old"}), early).await.unwrap();
    let new_id = store.insert(USER, &json!({"name": "New"}), late).await.unwrap();

    let response = fx
        .service
        .pull(USER, "account_types", Some("2026-01-15T00:00:00.000Z"))
        .await
        .unwrap();

    assert_eq!(response.records.len(), 1);
    assert_eq!(response.records[0]["id"], json!(new_id));
    assert_eq!(response.owner_id, USER);
    assert!(!response.has_more);
}

#[tokio::test]
async fn pull_without_checkpoint_returns_everything_for_owner_only() {
    let fx = fixture();
    seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "Mine"})).await;
    seed(&fx, SyncTable::AccountTypes, OTHER_USER, json!({"name": "Theirs"})).await;

    let response = fx.service.pull(USER, "account_types", None).await.unwrap();

    assert_eq!(response.records.len(), 1);
    assert_eq!(response.records[0]["name"], "Mine");
}

#[tokio::test]
async fn pull_orders_by_updated_at_then_id() {
    let fx = fixture();
    let store = fx.registry.store(SyncTable::AccountTypes);
    let shared = time_utils::parse_rfc3339("2026-03-01T00:00:00.000Z").unwrap();
    let later = time_utils::parse_rfc3339("2026-03-02T00:00:00.000Z").unwrap();
    let a = store.insert(USER, &json!({"name": "A"}), shared).await.unwrap();
    let b = store.insert(USER, &json!({"name": "B"}), shared).await.unwrap();
    let c = store.insert(USER, &json!({"name": "C"}), later).await.unwrap();

    let response = fx.service.pull(USER, "account_types", None).await.unwrap();
    let ids: Vec<i64> = response
        .records
        .iter()
        .map(|record| record["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, b, c]);
}

#[tokio::test]
async fn pull_rejects_bad_input_before_touching_data() {
    let fx = fixture();

    let unsupported = fx.service.pull(USER, "users", None).await;
    assert!(matches!(
        unsupported,
        Err(Error::Validation(ValidationError::UnsupportedTable(_)))
    ));

    let bad_checkpoint = fx
        .service
        .pull(USER, "accounts", Some("not-a-timestamp"))
        .await;
    assert!(matches!(
        bad_checkpoint,
        Err(Error::Validation(ValidationError::InvalidTimestamp(_)))
    ));
}

#[tokio::test]
async fn push_rejects_unsupported_table() {
    let fx = fixture();
    let request = PushRequest {
        table: "sessions".to_string(),
        creates: vec![],
        updates: vec![],
        deletes: vec![],
    };
    assert!(matches!(
        fx.service.push(USER, request).await,
        Err(Error::Validation(ValidationError::UnsupportedTable(_)))
    ));
}

#[tokio::test]
async fn status_counts_live_rows_per_table() {
    let fx = fixture();
    seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "One"})).await;
    let doomed = seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "Two"})).await;
    fx.registry
        .store(SyncTable::AccountTypes)
        .soft_delete(USER, doomed, time_utils::now_utc())
        .await
        .unwrap();
    seed(&fx, SyncTable::AccountTypes, OTHER_USER, json!({"name": "Else"})).await;

    let status = fx.service.status(USER).unwrap();

    assert_eq!(status.tables["account_types"], 1);
    assert_eq!(status.tables["payments"], 0);
    assert_eq!(status.supported_tables.len(), SyncTable::ALL.len());
}

#[tokio::test]
async fn purge_all_removes_only_the_callers_rows() {
    let fx = fixture();
    seed(&fx, SyncTable::AccountTypes, USER, json!({"name": "Mine"})).await;
    seed(&fx, SyncTable::Banks, USER, json!({"code": 1, "name": "BB", "agency": "1", "account": "2"})).await;
    seed(&fx, SyncTable::AccountTypes, OTHER_USER, json!({"name": "Theirs"})).await;

    let deleted = fx.service.purge_all(USER).await.unwrap();

    assert_eq!(deleted["account_types"], 1);
    assert_eq!(deleted["banks"], 1);
    assert_eq!(deleted["payments"], 0);
    assert_eq!(
        fx.registry
            .store(SyncTable::AccountTypes)
            .count(OTHER_USER)
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn validator_accepts_absent_and_zero_foreign_keys() {
    let fx = fixture();
    let validator = OwnershipValidator::new(fx.registry.clone());

    let record = json!({"description": "Luz", "dueDay": 10, "categoryId": null, "cardId": 0});
    let check = validator
        .validate(SyncTable::Accounts, &record, USER)
        .unwrap();
    // typeId is absent too: FK presence is the codec's concern, ownership
    // only judges keys that are actually there.
    assert!(check.is_valid());
}
