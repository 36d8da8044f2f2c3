//! Payment method domain model and wire codec.
//!
//! The client's historical wire shape mixes snake_case business fields
//! (`icon_code`, `requires_bank`, `is_active`) with camelCase timestamps,
//! and serializes the two flags as 0/1. The `usage` field is a small enum:
//! 0 = payments only, 1 = receipts only, 2 = both.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::utils::{time_utils, wire};

/// Where a payment method may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethodUsage {
    PayOnly,
    ReceiveOnly,
    Both,
}

impl PaymentMethodUsage {
    pub fn from_wire(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::PayOnly),
            1 => Ok(Self::ReceiveOnly),
            2 => Ok(Self::Both),
            other => Err(ValidationError::InvalidValue {
                field: "usage",
                message: format!("{other} is not one of 0, 1, 2"),
            }
            .into()),
        }
    }

    pub fn as_wire(self) -> i32 {
        match self {
            Self::PayOnly => 0,
            Self::ReceiveOnly => 1,
            Self::Both => 2,
        }
    }
}

/// Stored representation of a payment method.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Kind tag, e.g. "credit_card", "debit", "pix", "cash".
    pub kind: String,
    /// Material icon code point shown by the client.
    pub icon_code: i32,
    pub requires_bank: bool,
    pub is_active: bool,
    pub usage: i32,
    pub logo: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Insert shape; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPaymentMethod {
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

fn default_active() -> bool {
    true
}

fn default_usage() -> i32 {
    PaymentMethodUsage::Both.as_wire()
}

/// Client-side record shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentMethodData {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "icon_code", alias = "iconCode")]
    pub icon_code: i32,
    #[serde(
        rename = "requires_bank",
        alias = "requiresBank",
        default,
        with = "wire::flag"
    )]
    pub requires_bank: bool,
    #[serde(
        rename = "is_active",
        alias = "isActive",
        default = "default_active",
        with = "wire::flag"
    )]
    pub is_active: bool,
    #[serde(default = "default_usage")]
    pub usage: i32,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "deletedAt", default)]
    pub deleted_at: Option<String>,
}

impl PaymentMethodData {
    /// Rejects values the storage layer would otherwise persist blindly.
    pub fn validate(&self) -> Result<()> {
        PaymentMethodUsage::from_wire(self.usage)?;
        Ok(())
    }
}

impl NewPaymentMethod {
    pub fn from_client(data: &PaymentMethodData, owner_id: i64, now: NaiveDateTime) -> Self {
        Self {
            user_id: owner_id,
            name: data.name.clone(),
            kind: data.kind.clone(),
            icon_code: data.icon_code,
            requires_bank: data.requires_bank,
            is_active: data.is_active,
            usage: data.usage,
            logo: data.logo.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl PaymentMethod {
    pub fn to_client(&self) -> PaymentMethodData {
        PaymentMethodData {
            id: Some(self.id),
            name: self.name.clone(),
            kind: self.kind.clone(),
            icon_code: self.icon_code,
            requires_bank: self.requires_bank,
            is_active: self.is_active,
            usage: self.usage,
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
    fn reads_both_flag_conventions() {
        let data: PaymentMethodData = serde_json::from_value(json!({
            "name": "PIX",
            "type": "pix",
            "iconCode": 61294,
            "requiresBank": true,
            "is_active": 1
        }))
        .unwrap();
        assert!(data.requires_bank);
        assert!(data.is_active);
        assert_eq!(data.usage, 2);
    }

    #[test]
    fn emits_flags_as_integers() {
        let now = time_utils::now_utc();
        let stored = PaymentMethod {
            id: 5,
            user_id: 1,
            name: "Dinheiro".to_string(),
            kind: "cash".to_string(),
            icon_code: 0xe19e,
            requires_bank: false,
            is_active: true,
            usage: 2,
            logo: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let value = serde_json::to_value(stored.to_client()).unwrap();
        assert_eq!(value["requires_bank"], 0);
        assert_eq!(value["is_active"], 1);
        assert_eq!(value["type"], "cash");
    }

    #[test]
    fn rejects_out_of_range_usage() {
        let data: PaymentMethodData = serde_json::from_value(json!({
            "name": "X",
            "type": "other",
            "icon_code": 1,
            "usage": 9
        }))
        .unwrap();
        assert!(data.validate().is_err());
    }
}
