//! Database model for account types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::account_types::{AccountType, NewAccountType};

/// Database row for account types.
#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::account_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountTypeRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; the id comes back from SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::account_types)]
pub struct NewAccountTypeRow {
    pub user_id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-record update shape. `treat_none_as_null` because a sync update
/// carries the client's complete record: an absent optional field means
/// the client cleared it.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::account_types)]
#[diesel(treat_none_as_null = true)]
pub struct AccountTypeChangeset {
    pub name: String,
    pub logo: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<AccountTypeRow> for AccountType {
    fn from(row: AccountTypeRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            logo: row.logo,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewAccountType> for NewAccountTypeRow {
    fn from(domain: NewAccountType) -> Self {
        Self {
            user_id: domain.user_id,
            name: domain.name,
            logo: domain.logo,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewAccountType> for AccountTypeChangeset {
    fn from(domain: NewAccountType) -> Self {
        Self {
            name: domain.name,
            logo: domain.logo,
            updated_at: domain.updated_at,
        }
    }
}
