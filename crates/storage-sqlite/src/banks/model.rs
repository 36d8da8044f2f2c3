//! Database model for banks.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::banks::{Bank, NewBank};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::banks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BankRow {
    pub id: i64,
    pub user_id: i64,
    pub code: i32,
    pub name: String,
    pub description: String,
    pub agency: String,
    pub account: String,
    pub color: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::banks)]
pub struct NewBankRow {
    pub user_id: i64,
    pub code: i32,
    pub name: String,
    pub description: String,
    pub agency: String,
    pub account: String,
    pub color: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::banks)]
#[diesel(treat_none_as_null = true)]
pub struct BankChangeset {
    pub code: i32,
    pub name: String,
    pub description: String,
    pub agency: String,
    pub account: String,
    pub color: i64,
    pub updated_at: NaiveDateTime,
}

impl From<BankRow> for Bank {
    fn from(row: BankRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            code: row.code,
            name: row.name,
            description: row.description,
            agency: row.agency,
            account: row.account,
            color: row.color,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewBank> for NewBankRow {
    fn from(domain: NewBank) -> Self {
        Self {
            user_id: domain.user_id,
            code: domain.code,
            name: domain.name,
            description: domain.description,
            agency: domain.agency,
            account: domain.account,
            color: domain.color,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewBank> for BankChangeset {
    fn from(domain: NewBank) -> Self {
        Self {
            code: domain.code,
            name: domain.name,
            description: domain.description,
            agency: domain.agency,
            account: domain.account,
            color: domain.color,
            updated_at: domain.updated_at,
        }
    }
}
