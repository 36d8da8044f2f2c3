//! Payment domain model and wire codec.
//!
//! A payment settles (part of) an account. Its wire shape is the one
//! entity the client kept in snake_case, timestamps excepted. The
//! optional `credit_card_id` points at an account row with a card brand.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils;

/// Stored representation of a payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub account_id: i64,
    pub payment_method_id: i64,
    pub bank_account_id: Option<i64>,
    pub credit_card_id: Option<i64>,
    pub value: f64,
    /// Payment date as the client's ISO date string.
    pub payment_date: String,
    pub observation: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPayment {
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

/// Client-side record shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "accountId")]
    pub account_id: i64,
    #[serde(alias = "paymentMethodId")]
    pub payment_method_id: i64,
    #[serde(alias = "bankAccountId", default)]
    pub bank_account_id: Option<i64>,
    #[serde(alias = "creditCardId", default)]
    pub credit_card_id: Option<i64>,
    pub value: f64,
    #[serde(alias = "paymentDate")]
    pub payment_date: String,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

impl NewPayment {
    pub fn from_client(data: &PaymentData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            account_id: data.account_id,
            payment_method_id: data.payment_method_id,
            bank_account_id: data.bank_account_id,
            credit_card_id: data.credit_card_id,
            value: data.value,
            payment_date: data.payment_date.clone(),
            observation: data.observation.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Payment {
    pub fn to_client(&self) -> PaymentData {
        PaymentData {
            id: Some(self.id),
            account_id: self.account_id,
            payment_method_id: self.payment_method_id,
            bank_account_id: self.bank_account_id,
            credit_card_id: self.credit_card_id,
            value: self.value,
            payment_date: self.payment_date.clone(),
            observation: self.observation.clone(),
            created_at: Some(time_utils::to_rfc3339(self.created_at)),
            updated_at: Some(time_utils::to_rfc3339(self.updated_at)),
            deleted_at: self.deleted_at.map(time_utils::to_rfc3339),
        }
    }
}
