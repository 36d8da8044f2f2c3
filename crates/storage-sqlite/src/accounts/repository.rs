use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value;

use finbook_core::accounts::{Account, AccountData, NewAccount};
use finbook_core::errors::{Error, Result, ValidationError};
use finbook_core::sync::{SyncRow, SyncStoreTrait, UpdateOutcome};

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::accounts;

use super::model::{AccountChangeset, AccountRow, NewAccountRow};

/// Owner-scoped sync store for the `accounts` table.
pub struct AccountSyncRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl AccountSyncRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn decode(record: &Value) -> Result<AccountData> {
        let data: AccountData = serde_json::from_value(record.clone())
            .map_err(|e| ValidationError::InvalidRecord(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }
}

fn to_sync_row(row: AccountRow) -> Result<SyncRow> {
    let entity = Account::from(row);
    Ok(SyncRow {
        server_id: entity.id,
        updated_at: entity.updated_at,
        deleted_at: entity.deleted_at,
        data: serde_json::to_value(entity.to_client())
            .map_err(|e| Error::Unexpected(e.to_string()))?,
    })
}

#[async_trait]
impl SyncStoreTrait for AccountSyncRepository {
    async fn insert(&self, owner_id: i64, record: &Value, now: NaiveDateTime) -> Result<i64> {
        let data = Self::decode(record)?;
        let new_row = NewAccountRow::from(NewAccount::from_client(&data, owner_id, now));

        self.writer
            .exec(move |conn| {
                diesel::insert_into(accounts::table)
                    .values(&new_row)
                    .returning(accounts::id)
                    .get_result::<i64>(conn)
                    .into_core()
            })
            .await
    }

    async fn update_checked(
        &self,
        owner_id: i64,
        server_id: i64,
        known_updated_at: NaiveDateTime,
        record: &Value,
        now: NaiveDateTime,
    ) -> Result<UpdateOutcome> {
        let data = Self::decode(record)?;
        let changes = AccountChangeset::from(NewAccount::from_client(&data, owner_id, now));

        self.writer
            .exec(move |conn| {
                let existing = accounts::table
                    .filter(accounts::id.eq(server_id))
                    .filter(accounts::user_id.eq(owner_id))
                    .select(AccountRow::as_select())
                    .first::<AccountRow>(conn)
                    .optional()
                    .into_core()?;

                let Some(row) = existing else {
                    return Ok(UpdateOutcome::NotFound);
                };
                if row.updated_at > known_updated_at {
                    return Ok(UpdateOutcome::Conflict(to_sync_row(row)?));
                }

                diesel::update(
                    accounts::table
                        .filter(accounts::id.eq(server_id))
                        .filter(accounts::user_id.eq(owner_id)),
                )
                .set(&changes)
                .execute(conn)
                .into_core()?;

                Ok(UpdateOutcome::Applied)
            })
            .await
    }

    async fn soft_delete(
        &self,
        owner_id: i64,
        server_id: i64,
        now: NaiveDateTime,
    ) -> Result<bool> {
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(
                    accounts::table
                        .filter(accounts::id.eq(server_id))
                        .filter(accounts::user_id.eq(owner_id))
                        .filter(accounts::deleted_at.is_null()),
                )
                .set((
                    accounts::deleted_at.eq(Some(now)),
                    accounts::updated_at.eq(now),
                ))
                .execute(conn)
                .into_core()?;
                Ok(affected > 0)
            })
            .await
    }

    fn changed_since(
        &self,
        owner_id: i64,
        since: Option<NaiveDateTime>,
        limit: i64,
    ) -> Result<Vec<SyncRow>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table
            .filter(accounts::user_id.eq(owner_id))
            .into_boxed();
        if let Some(checkpoint) = since {
            query = query.filter(accounts::updated_at.gt(checkpoint));
        }

        let rows = query
            .order((accounts::updated_at.asc(), accounts::id.asc()))
            .limit(limit)
            .select(AccountRow::as_select())
            .load::<AccountRow>(&mut conn)
            .into_core()?;

        rows.into_iter().map(to_sync_row).collect()
    }

    fn owner_of(&self, server_id: i64) -> Result<Option<i64>> {
        let mut conn = get_connection(&self.pool)?;
        accounts::table
            .filter(accounts::id.eq(server_id))
            .filter(accounts::deleted_at.is_null())
            .select(accounts::user_id)
            .first::<i64>(&mut conn)
            .optional()
            .into_core()
    }

    fn count(&self, owner_id: i64) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        accounts::table
            .filter(accounts::user_id.eq(owner_id))
            .filter(accounts::deleted_at.is_null())
            .count()
            .get_result(&mut conn)
            .into_core()
    }

    async fn purge(&self, owner_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn| {
                diesel::delete(accounts::table.filter(accounts::user_id.eq(owner_id)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
