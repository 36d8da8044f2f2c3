//! Account domain model and wire codec.
//!
//! An account is a payable/receivable obligation, or a credit card when
//! `card_brand` is set. Two self-references tie the table to itself:
//! `card_id` links a card expense to its card row, and `recurrence_id`
//! links a generated occurrence to its recurrence template. `purchase_uuid`
//! groups the installments of a single purchase.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::{time_utils, wire};

/// Stored representation of an account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub type_id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub value: f64,
    /// Expected/average value for recurrences.
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
    /// Best day to buy within the card cycle; cards only.
    pub best_buy_day: Option<i32>,
    /// Non-null marks this row as a credit card.
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

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
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

/// Client-side record shape for accounts (camelCase, with snake_case
/// fallbacks for fields older client builds sent that way).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "type_id")]
    pub type_id: i64,
    #[serde(alias = "category_id", default)]
    pub category_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub value: f64,
    #[serde(alias = "estimated_value", default)]
    pub estimated_value: Option<f64>,
    #[serde(alias = "due_day")]
    pub due_day: i32,
    #[serde(default)]
    pub month: Option<i32>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(alias = "is_recurrent", default, with = "wire::flag")]
    pub is_recurrent: bool,
    #[serde(alias = "pay_in_advance", default, with = "wire::flag")]
    pub pay_in_advance: bool,
    #[serde(alias = "recurrence_id", default)]
    pub recurrence_id: Option<i64>,
    #[serde(alias = "installment_index", default)]
    pub installment_index: Option<i32>,
    #[serde(alias = "installment_total", default)]
    pub installment_total: Option<i32>,
    #[serde(alias = "purchase_uuid", default)]
    pub purchase_uuid: Option<String>,
    #[serde(alias = "best_buy_day", default)]
    pub best_buy_day: Option<i32>,
    #[serde(alias = "card_brand", default)]
    pub card_brand: Option<String>,
    #[serde(alias = "card_bank", default)]
    pub card_bank: Option<String>,
    #[serde(alias = "card_limit", default)]
    pub card_limit: Option<f64>,
    #[serde(alias = "card_color", default)]
    pub card_color: Option<i64>,
    #[serde(alias = "card_id", default)]
    pub card_id: Option<i64>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub establishment: Option<String>,
    #[serde(alias = "purchase_date", default)]
    pub purchase_date: Option<String>,
    #[serde(alias = "creation_date", default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl AccountData {
    /// Range checks mirroring what the client enforces in its forms.
    pub fn validate(&self) -> Result<()> {
        if !(1..=31).contains(&self.due_day) {
            return Err(ValidationError::InvalidValue {
                field: "dueDay",
                message: format!("{} is outside 1..=31", self.due_day),
            }
            .into());
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::InvalidValue {
                    field: "month",
                    message: format!("{month} is outside 1..=12"),
                }
                .into());
            }
        }
        if let Some(year) = self.year {
            if !(2000..=2100).contains(&year) {
                return Err(ValidationError::InvalidValue {
                    field: "year",
                    message: format!("{year} is outside 2000..=2100"),
                }
                .into());
            }
        }
        if let Some(day) = self.best_buy_day {
            if !(1..=31).contains(&day) {
                return Err(ValidationError::InvalidValue {
                    field: "bestBuyDay",
                    message: format!("{day} is outside 1..=31"),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl NewAccount {
    pub fn from_client(data: &AccountData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            type_id: data.type_id,
            category_id: data.category_id,
            description: data.description.clone(),
            value: data.value,
            estimated_value: data.estimated_value,
            due_day: data.due_day,
            month: data.month,
            year: data.year,
            is_recurrent: data.is_recurrent,
            pay_in_advance: data.pay_in_advance,
            recurrence_id: data.recurrence_id,
            installment_index: data.installment_index,
            installment_total: data.installment_total,
            purchase_uuid: data.purchase_uuid.clone(),
            best_buy_day: data.best_buy_day,
            card_brand: data.card_brand.clone(),
            card_bank: data.card_bank.clone(),
            card_limit: data.card_limit,
            card_color: data.card_color,
            card_id: data.card_id,
            logo: data.logo.clone(),
            observation: data.observation.clone(),
            establishment: data.establishment.clone(),
            purchase_date: data.purchase_date.clone(),
            creation_date: data.creation_date.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Account {
    /// True when this row is a credit card rather than an obligation.
    pub fn is_card(&self) -> bool {
        self.card_brand.is_some()
    }

    pub fn to_client(&self) -> AccountData {
        AccountData {
            id: Some(self.id),
            type_id: self.type_id,
            category_id: self.category_id,
            description: self.description.clone(),
            value: self.value,
            estimated_value: self.estimated_value,
            due_day: self.due_day,
            month: self.month,
            year: self.year,
            is_recurrent: self.is_recurrent,
            pay_in_advance: self.pay_in_advance,
            recurrence_id: self.recurrence_id,
            installment_index: self.installment_index,
            installment_total: self.installment_total,
            purchase_uuid: self.purchase_uuid.clone(),
            best_buy_day: self.best_buy_day,
            card_brand: self.card_brand.clone(),
            card_bank: self.card_bank.clone(),
            card_limit: self.card_limit,
            card_color: self.card_color,
            card_id: self.card_id,
            logo: self.logo.clone(),
            observation: self.observation.clone(),
            establishment: self.establishment.clone(),
            purchase_date: self.purchase_date.clone(),
            creation_date: self.creation_date.clone(),
            updated_at: Some(time_utils::to_rfc3339(self.updated_at)),
            deleted_at: self.deleted_at.map(time_utils::to_rfc3339),
        }
    }
}
