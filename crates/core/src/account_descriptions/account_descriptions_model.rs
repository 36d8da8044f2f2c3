//! Account description domain model and wire codec.
//!
//! A description refines an account type into a subcategory. The client
//! calls the parent reference `accountId` even though it points at
//! `account_types`; older client builds sent the name as `categoria`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils;

/// Stored representation of a subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDescription {
    pub id: i64,
    pub user_id: i64,
    pub account_type_id: i64,
    pub description: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccountDescription {
    pub user_id: i64,
    pub account_type_id: i64,
    pub description: String,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Client-side record shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountDescriptionData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_type_id: i64,
    #[serde(alias = "categoria")]
    pub description: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

impl NewAccountDescription {
    pub fn from_client(data: &AccountDescriptionData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            account_type_id: data.account_type_id,
            description: data.description.clone(),
            logo: data.logo.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl AccountDescription {
    pub fn to_client(&self) -> AccountDescriptionData {
        AccountDescriptionData {
            id: Some(self.id),
            account_type_id: self.account_type_id,
            description: self.description.clone(),
            logo: self.logo.clone(),
            updated_at: Some(time_utils::to_rfc3339(self.updated_at)),
            deleted_at: self.deleted_at.map(time_utils::to_rfc3339),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_legacy_field_names() {
        let data: AccountDescriptionData =
            serde_json::from_value(json!({"account_id": 3, "categoria": "Farmácia"})).unwrap();
        assert_eq!(data.account_type_id, 3);
        assert_eq!(data.description, "Farmácia");
    }

    #[test]
    fn emits_client_field_names() {
        let now = time_utils::now_utc();
        let stored = AccountDescription {
            id: 11,
            user_id: 2,
            account_type_id: 3,
            description: "Mercado".to_string(),
            logo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let value = serde_json::to_value(stored.to_client()).unwrap();
        assert_eq!(value["accountId"], 3);
        assert_eq!(value["description"], "Mercado");
    }
}
