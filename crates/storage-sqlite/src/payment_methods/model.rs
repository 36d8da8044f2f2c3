//! Database model for payment methods.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::payment_methods::{NewPaymentMethod, PaymentMethod};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::payment_methods)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentMethodRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub icon_code: i32,
    pub requires_bank: bool,
    pub is_active: bool,
    pub usage: i32,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::payment_methods)]
pub struct NewPaymentMethodRow {
    pub user_id: i64,
    pub name: String,
    pub kind: String,
    pub icon_code: i32,
    pub requires_bank: bool,
    pub is_active: bool,
    pub usage: i32,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::payment_methods)]
#[diesel(treat_none_as_null = true)]
pub struct PaymentMethodChangeset {
    pub name: String,
    pub kind: String,
    pub icon_code: i32,
    pub requires_bank: bool,
    pub is_active: bool,
    pub usage: i32,
    pub logo: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<PaymentMethodRow> for PaymentMethod {
    fn from(row: PaymentMethodRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            kind: row.kind,
            icon_code: row.icon_code,
            requires_bank: row.requires_bank,
            is_active: row.is_active,
            usage: row.usage,
            logo: row.logo,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewPaymentMethod> for NewPaymentMethodRow {
    fn from(domain: NewPaymentMethod) -> Self {
        Self {
            user_id: domain.user_id,
            name: domain.name,
            kind: domain.kind,
            icon_code: domain.icon_code,
            requires_bank: domain.requires_bank,
            is_active: domain.is_active,
            usage: domain.usage,
            logo: domain.logo,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewPaymentMethod> for PaymentMethodChangeset {
    fn from(domain: NewPaymentMethod) -> Self {
        Self {
            name: domain.name,
            kind: domain.kind,
            icon_code: domain.icon_code,
            requires_bank: domain.requires_bank,
            is_active: domain.is_active,
            usage: domain.usage,
            logo: domain.logo,
            updated_at: domain.updated_at,
        }
    }
}
