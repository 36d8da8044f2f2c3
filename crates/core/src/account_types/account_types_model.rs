//! Account type domain model and wire codec.
//!
//! Account types are the top-level categories a user sorts obligations
//! into ("Housing", "Health", ...). The client treats them as global;
//! the server keeps one set per user for tenant isolation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils;

/// Stored representation of an account type.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountType {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccountType {
    pub user_id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Client-side record shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountTypeData {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

impl NewAccountType {
    /// Maps a client record to storage shape, substituting the
    /// authenticated owner for whatever the payload claimed.
    pub fn from_client(data: &AccountTypeData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            name: data.name.clone(),
            logo: data.logo.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl AccountType {
    /// Maps the stored row back to the client shape.
    pub fn to_client(&self) -> AccountTypeData {
        AccountTypeData {
            id: Some(self.id),
            name: self.name.clone(),
            logo: self.logo.clone(),
            updated_at: Some(time_utils::to_rfc3339(self.updated_at)),
            deleted_at: self.deleted_at.map(time_utils::to_rfc3339),
        }
    }
}
