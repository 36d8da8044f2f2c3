//! Database model for payments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use finbook_core::payments::{NewPayment, Payment};

#[derive(Queryable, Identifiable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PaymentRow {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub payment_method_id: i64,
    pub bank_account_id: Option<i64>,
    pub credit_card_id: Option<i64>,
    pub value: f64,
    pub payment_date: String,
    pub observation: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
pub struct NewPaymentRow {
    pub user_id: i64,
    pub account_id: i64,
    pub payment_method_id: i64,
    pub bank_account_id: Option<i64>,
    pub credit_card_id: Option<i64>,
    pub value: f64,
    pub payment_date: String,
    pub observation: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::payments)]
#[diesel(treat_none_as_null = true)]
pub struct PaymentChangeset {
    pub account_id: i64,
    pub payment_method_id: i64,
    pub bank_account_id: Option<i64>,
    pub credit_card_id: Option<i64>,
    pub value: f64,
    pub payment_date: String,
    pub observation: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            account_id: row.account_id,
            payment_method_id: row.payment_method_id,
            bank_account_id: row.bank_account_id,
            credit_card_id: row.credit_card_id,
            value: row.value,
            payment_date: row.payment_date,
            observation: row.observation,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

impl From<NewPayment> for NewPaymentRow {
    fn from(domain: NewPayment) -> Self {
        Self {
            user_id: domain.user_id,
            account_id: domain.account_id,
            payment_method_id: domain.payment_method_id,
            bank_account_id: domain.bank_account_id,
            credit_card_id: domain.credit_card_id,
            value: domain.value,
            payment_date: domain.payment_date,
            observation: domain.observation,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl From<NewPayment> for PaymentChangeset {
    fn from(domain: NewPayment) -> Self {
        Self {
            account_id: domain.account_id,
            payment_method_id: domain.payment_method_id,
            bank_account_id: domain.bank_account_id,
            credit_card_id: domain.credit_card_id,
            value: domain.value,
            payment_date: domain.payment_date,
            observation: domain.observation,
            updated_at: domain.updated_at,
        }
    }
}
