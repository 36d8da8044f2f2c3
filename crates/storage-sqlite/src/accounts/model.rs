//! Database model for accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::accounts::{Account, NewAccount};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccountRow {
    pub id: i64,
    pub user_id: i64,
    pub type_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub value: f64,
    pub estimated_value: Option<f64>,
    pub due_day: i32,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub is_recurrent: bool,
    pub pay_in_advance: bool,
    pub recurrence_id: Option<i64>,
    pub installment_index: Option<i32>,
    pub installment_total: Option<i32>,
    pub purchase_uuid: Option<String>,
    pub best_buy_day: Option<i32>,
    pub card_brand: Option<String>,
    pub card_bank: Option<String>,
    pub card_limit: Option<f64>,
    pub card_color: Option<i64>,
    pub card_id: Option<i64>,
    pub logo: Option<String>,
    pub observation: Option<String>,
    pub establishment: Option<String>,
    pub purchase_date: Option<String>,
    pub creation_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccountRow {
    pub user_id: i64,
    pub type_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub value: f64,
    pub estimated_value: Option<f64>,
    pub due_day: i32,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub is_recurrent: bool,
    pub pay_in_advance: bool,
    pub recurrence_id: Option<i64>,
    pub installment_index: Option<i32>,
    pub installment_total: Option<i32>,
    pub purchase_uuid: Option<String>,
    pub best_buy_day: Option<i32>,
    pub card_brand: Option<String>,
    pub card_bank: Option<String>,
    pub card_limit: Option<f64>,
    pub card_color: Option<i64>,
    pub card_id: Option<i64>,
    pub logo: Option<String>,
    pub observation: Option<String>,
    pub establishment: Option<String>,
    pub purchase_date: Option<String>,
    pub creation_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(treat_none_as_null = true)]
pub struct AccountChangeset {
    pub type_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub value: f64,
    pub estimated_value: Option<f64>,
    pub due_day: i32,
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub is_recurrent: bool,
    pub pay_in_advance: bool,
    pub recurrence_id: Option<i64>,
    pub installment_index: Option<i32>,
    pub installment_total: Option<i32>,
    pub purchase_uuid: Option<String>,
    pub best_buy_day: Option<i32>,
    pub card_brand: Option<String>,
    pub card_bank: Option<String>,
    pub card_limit: Option<f64>,
    pub card_color: Option<i64>,
    pub card_id: Option<i64>,
    pub logo: Option<String>,
    pub observation: Option<String>,
    pub establishment: Option<String>,
    pub purchase_date: Option<String>,
    pub creation_date: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            type_id: row.type_id,
            category_id: row.category_id,
            description: row.description,
            value: row.value,
            estimated_value: row.estimated_value,
            due_day: row.due_day,
            month: row.month,
            year: row.year,
            is_recurrent: row.is_recurrent,
            pay_in_advance: row.pay_in_advance,
            recurrence_id: row.recurrence_id,
            installment_index: row.installment_index,
            installment_total: row.installment_total,
            purchase_uuid: row.purchase_uuid,
            best_buy_day: row.best_buy_day,
            card_brand: row.card_brand,
            card_bank: row.card_bank,
            card_limit: row.card_limit,
            card_color: row.card_color,
            card_id: row.card_id,
            logo: row.logo,
            observation: row.observation,
            establishment: row.establishment,
            purchase_date: row.purchase_date,
            creation_date: row.creation_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewAccount> for NewAccountRow {
    fn from(domain: NewAccount) -> Self {
        Self {
            user_id: domain.user_id,
            type_id: domain.type_id,
            category_id: domain.category_id,
            description: domain.description,
            value: domain.value,
            estimated_value: domain.estimated_value,
            due_day: domain.due_day,
            month: domain.month,
            year: domain.year,
            is_recurrent: domain.is_recurrent,
            pay_in_advance: domain.pay_in_advance,
            recurrence_id: domain.recurrence_id,
            installment_index: domain.installment_index,
            installment_total: domain.installment_total,
            purchase_uuid: domain.purchase_uuid,
            best_buy_day: domain.best_buy_day,
            card_brand: domain.card_brand,
            card_bank: domain.card_bank,
            card_limit: domain.card_limit,
            card_color: domain.card_color,
            card_id: domain.card_id,
            logo: domain.logo,
            observation: domain.observation,
            establishment: domain.establishment,
            purchase_date: domain.purchase_date,
            creation_date: domain.creation_date,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewAccount> for AccountChangeset {
    fn from(domain: NewAccount) -> Self {
        Self {
            type_id: domain.type_id,
            category_id: domain.category_id,
            description: domain.description,
            value: domain.value,
            estimated_value: domain.estimated_value,
            due_day: domain.due_day,
            month: domain.month,
            year: domain.year,
            is_recurrent: domain.is_recurrent,
            pay_in_advance: domain.pay_in_advance,
            recurrence_id: domain.recurrence_id,
            installment_index: domain.installment_index,
            installment_total: domain.installment_total,
            purchase_uuid: domain.purchase_uuid,
            best_buy_day: domain.best_buy_day,
            card_brand: domain.card_brand,
            card_bank: domain.card_bank,
            card_limit: domain.card_limit,
            card_color: domain.card_color,
            card_id: domain.card_id,
            logo: domain.logo,
            observation: domain.observation,
            establishment: domain.establishment,
            purchase_date: domain.purchase_date,
            creation_date: domain.creation_date,
            updated_at: domain.updated_at,
        }
    }
}
