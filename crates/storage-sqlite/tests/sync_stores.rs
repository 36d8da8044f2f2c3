//! Integration tests for the sync repositories against a real SQLite file.

use serde_json::json;
use tempfile::TempDir;

use finbook_core::errors::{DatabaseError, Error};
use finbook_core::sync::{SyncStoreTrait, UpdateOutcome};
use finbook_core::utils::time_utils;
use finbook_storage_sqlite::account_types::AccountTypeSyncRepository;
use finbook_storage_sqlite::accounts::AccountSyncRepository;
use finbook_storage_sqlite::db;

const USER: i64 = 1;
const OTHER_USER: i64 = 2;

struct TestDb {
    // Held so the database file outlives the repositories.
    _dir: TempDir,
    pool: db::DbPool,
    writer: db::WriteHandle,
}

fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = db::init(dir.path().join("finbook-test.db").to_str().unwrap()).unwrap();
    let pool = db::create_pool(&path).unwrap();
    db::run_migrations(&pool).unwrap();
    let writer = db::spawn_writer(pool.clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn account_types_repo(db: &TestDb) -> AccountTypeSyncRepository {
    AccountTypeSyncRepository::new(db.pool.clone(), db.writer.clone())
}

fn accounts_repo(db: &TestDb) -> AccountSyncRepository {
    AccountSyncRepository::new(db.pool.clone(), db.writer.clone())
}

#[tokio::test]
async fn insert_assigns_ids_and_round_trips_through_the_codec() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let now = time_utils::now_utc();

    let id = repo
        .insert(USER, &json!({"name": "Moradia", "logo": "🏠"}), now)
        .await
        .unwrap();
    assert!(id > 0);

    let rows = repo.changed_since(USER, None, 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].server_id, id);
    assert_eq!(rows[0].data["name"], "Moradia");
    assert_eq!(rows[0].data["logo"], "🏠");
    assert!(rows[0].data["deletedAt"].is_null());
    assert_eq!(rows[0].updated_at, now);
}

#[tokio::test]
async fn duplicate_live_name_hits_the_partial_unique_index() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let now = time_utils::now_utc();

    repo.insert(USER, &json!({"name": "Consumo"}), now)
        .await
        .unwrap();
    let duplicate = repo.insert(USER, &json!({"name": "Consumo"}), now).await;
    assert!(matches!(
        duplicate,
        Err(Error::Database(DatabaseError::UniqueViolation(_)))
    ));

    // Another user may use the same name.
    repo.insert(OTHER_USER, &json!({"name": "Consumo"}), now)
        .await
        .unwrap();

    // And the name frees up once the row is soft-deleted.
    let rows = repo.changed_since(USER, None, 10).unwrap();
    repo.soft_delete(USER, rows[0].server_id, time_utils::now_utc())
        .await
        .unwrap();
    repo.insert(USER, &json!({"name": "Consumo"}), time_utils::now_utc())
        .await
        .unwrap();
}

#[tokio::test]
async fn update_checked_applies_then_conflicts_on_stale_clients() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let seeded_at = time_utils::parse_rfc3339("2026-01-01T00:00:00.000Z").unwrap();

    let id = repo
        .insert(USER, &json!({"name": "Saúde"}), seeded_at)
        .await
        .unwrap();

    let first = repo
        .update_checked(
            USER,
            id,
            seeded_at,
            &json!({"name": "Saúde e bem-estar"}),
            time_utils::now_utc(),
        )
        .await
        .unwrap();
    assert!(matches!(first, UpdateOutcome::Applied));

    // Same client-known timestamp again: the stored row is now newer.
    let second = repo
        .update_checked(
            USER,
            id,
            seeded_at,
            &json!({"name": "Sobrescrito"}),
            time_utils::now_utc(),
        )
        .await
        .unwrap();
    let UpdateOutcome::Conflict(row) = second else {
        panic!("expected a conflict");
    };
    assert_eq!(row.data["name"], "Saúde e bem-estar");

    // Another owner cannot reach the row at all.
    let foreign = repo
        .update_checked(
            OTHER_USER,
            id,
            time_utils::now_utc(),
            &json!({"name": "Alheio"}),
            time_utils::now_utc(),
        )
        .await
        .unwrap();
    assert!(matches!(foreign, UpdateOutcome::NotFound));
}

#[tokio::test]
async fn soft_delete_hides_rows_from_ownership_but_not_from_pull() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let now = time_utils::now_utc();

    let id = repo.insert(USER, &json!({"name": "Lazer"}), now).await.unwrap();
    assert_eq!(repo.owner_of(id).unwrap(), Some(USER));
    assert_eq!(repo.count(USER).unwrap(), 1);

    let deleted_at = time_utils::now_utc();
    assert!(repo.soft_delete(USER, id, deleted_at).await.unwrap());
    // Retrying the delete is a no-op.
    assert!(!repo.soft_delete(USER, id, time_utils::now_utc()).await.unwrap());

    assert_eq!(repo.owner_of(id).unwrap(), None);
    assert_eq!(repo.count(USER).unwrap(), 0);

    let rows = repo.changed_since(USER, None, 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].deleted_at.is_some());
}

#[tokio::test]
async fn changed_since_filters_scopes_and_orders() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let early = time_utils::parse_rfc3339("2026-01-01T00:00:00.000Z").unwrap();
    let shared = time_utils::parse_rfc3339("2026-02-01T00:00:00.000Z").unwrap();

    repo.insert(USER, &json!({"name": "Old"}), early).await.unwrap();
    let a = repo.insert(USER, &json!({"name": "A"}), shared).await.unwrap();
    let b = repo.insert(USER, &json!({"name": "B"}), shared).await.unwrap();
    repo.insert(OTHER_USER, &json!({"name": "Foreign"}), shared)
        .await
        .unwrap();

    let checkpoint = time_utils::parse_rfc3339("2026-01-15T00:00:00.000Z").unwrap();
    let rows = repo.changed_since(USER, Some(checkpoint), 10).unwrap();
    let ids: Vec<i64> = rows.iter().map(|row| row.server_id).collect();
    // Equal timestamps fall back to id order, so paging stays stable.
    assert_eq!(ids, vec![a, b]);

    let limited = repo.changed_since(USER, None, 2).unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn account_insert_enforces_database_foreign_keys() {
    let db = test_db();
    let types = account_types_repo(&db);
    let accounts = accounts_repo(&db);
    let now = time_utils::now_utc();

    let type_id = types.insert(USER, &json!({"name": "Consumo"}), now).await.unwrap();

    let ok = accounts
        .insert(
            USER,
            &json!({
                "description": "Netflix",
                "typeId": type_id,
                "value": 55.90,
                "dueDay": 15,
                "month": 1,
                "year": 2026
            }),
            now,
        )
        .await;
    assert!(ok.is_ok());

    // The pragma-enabled constraint is the last line of defense when a
    // referenced row disappears after validation.
    let dangling = accounts
        .insert(
            USER,
            &json!({
                "description": "Orphan",
                "typeId": 99999,
                "dueDay": 1
            }),
            now,
        )
        .await;
    assert!(matches!(
        dangling,
        Err(Error::Database(DatabaseError::ForeignKeyViolation(_)))
    ));
}

#[tokio::test]
async fn purge_hard_deletes_only_the_owner() {
    let db = test_db();
    let repo = account_types_repo(&db);
    let now = time_utils::now_utc();

    repo.insert(USER, &json!({"name": "Mine"}), now).await.unwrap();
    repo.insert(OTHER_USER, &json!({"name": "Theirs"}), now)
        .await
        .unwrap();

    assert_eq!(repo.purge(USER).await.unwrap(), 1);
    assert!(repo.changed_since(USER, None, 10).unwrap().is_empty());
    assert_eq!(repo.count(OTHER_USER).unwrap(), 1);
}
