//! Bank domain model and wire codec.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils;

/// Display color used when the client did not pick one.
pub const DEFAULT_BANK_COLOR: i64 = 0xFF1565C0;

/// Stored representation of a bank account.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub id: i64,
    pub user_id: i64,
    /// National clearing code of the institution (e.g. 001, 341).
    pub code: i32,
    pub name: String,
    pub description: String,
    pub agency: String,
    pub account: String,
    /// ARGB display color.
    pub color: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBank {
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

/// Client-side record shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankData {
    #[serde(default)]
    pub id: Option<i64>,
    pub code: i32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub agency: String,
    pub account: String,
    #[serde(default)]
    pub color: Option<i64>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

impl NewBank {
    pub fn from_client(data: &BankData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            code: data.code,
            name: data.name.clone(),
            description: data.description.clone().unwrap_or_default(),
            agency: data.agency.clone(),
            account: data.account.clone(),
            color: data.color.unwrap_or(DEFAULT_BANK_COLOR),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Bank {
    pub fn to_client(&self) -> BankData {
        BankData {
            id: Some(self.id),
            code: self.code,
            name: self.name.clone(),
            description: Some(self.description.clone()),
            agency: self.agency.clone(),
            account: self.account.clone(),
            color: Some(self.color),
            updated_at: Some(time_utils::to_rfc3339(self.updated_at)),
            deleted_at: self.deleted_at.map(time_utils::to_rfc3339),
        }
    }
}
