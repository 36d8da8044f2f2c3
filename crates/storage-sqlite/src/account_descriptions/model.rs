//! Database model for account descriptions (subcategories).
//!
//! The parent foreign key column is `account_id` for historical reasons
//! even though it references `account_types`.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::account_descriptions::{AccountDescription, NewAccountDescription};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::account_descriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountDescriptionRow {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub description: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::account_descriptions)]
pub struct NewAccountDescriptionRow {
    pub user_id: i64,
    pub account_id: i64,
    pub description: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::account_descriptions)]
#[diesel(treat_none_as_null = true)]
pub struct AccountDescriptionChangeset {
    pub account_id: i64,
    pub description: String,
    pub logo: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<AccountDescriptionRow> for AccountDescription {
    fn from(row: AccountDescriptionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            account_type_id: row.account_id,
            description: row.description,
            logo: row.logo,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewAccountDescription> for NewAccountDescriptionRow {
    fn from(domain: NewAccountDescription) -> Self {
        Self {
            user_id: domain.user_id,
            account_id: domain.account_type_id,
            description: domain.description,
            logo: domain.logo,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewAccountDescription> for AccountDescriptionChangeset {
    fn from(domain: NewAccountDescription) -> Self {
        Self {
            account_id: domain.account_type_id,
            description: domain.description,
            logo: domain.logo,
            updated_at: domain.updated_at,
        }
    }
}
