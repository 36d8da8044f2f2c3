//! Foreign-key ownership validation.
//!
//! The client is untrusted: any foreign key in a pushed record may point
//! at a row that does not exist, was deleted, or belongs to another
//! user. Every present key is therefore resolved against the referenced
//! table before a record is applied. A key that resolves to a foreign
//! owner is the signature of a cross-tenant attack and is logged as such.

use std::sync::Arc;

use serde_json::Value;

use super::sync_store::SyncRegistry;
use super::sync_table::SyncTable;
use crate::errors::Result;
use crate::utils::wire;

/// One foreign key a table's records may carry.
pub struct ForeignKeyField {
    /// Canonical client-side field name.
    pub name: &'static str,
    /// Alternate spellings older client builds use.
    pub aliases: &'static [&'static str],
    /// Table the referenced row must live in.
    pub references: SyncTable,
}

impl SyncTable {
    /// The foreign keys to check for records of this table. Tables absent
    /// here (`account_types`, `banks`) carry no checkable keys and
    /// trivially validate.
    pub fn foreign_keys(self) -> &'static [ForeignKeyField] {
        match self {
            SyncTable::AccountDescriptions => &[ForeignKeyField {
                name: "accountId",
                aliases: &["account_id"],
                references: SyncTable::AccountTypes,
            }],
            SyncTable::Accounts => &[
                ForeignKeyField {
                    name: "typeId",
                    aliases: &["type_id"],
                    references: SyncTable::AccountTypes,
                },
                ForeignKeyField {
                    name: "categoryId",
                    aliases: &["category_id"],
                    references: SyncTable::AccountDescriptions,
                },
                ForeignKeyField {
                    name: "cardId",
                    aliases: &["card_id"],
                    references: SyncTable::Accounts,
                },
                ForeignKeyField {
                    name: "recurrenceId",
                    aliases: &["recurrence_id"],
                    references: SyncTable::Accounts,
                },
            ],
            SyncTable::Payments => &[
                ForeignKeyField {
                    name: "account_id",
                    aliases: &["accountId"],
                    references: SyncTable::Accounts,
                },
                ForeignKeyField {
                    name: "payment_method_id",
                    aliases: &["paymentMethodId"],
                    references: SyncTable::PaymentMethods,
                },
                ForeignKeyField {
                    name: "bank_account_id",
                    aliases: &["bankAccountId"],
                    references: SyncTable::Banks,
                },
                ForeignKeyField {
                    name: "credit_card_id",
                    aliases: &["creditCardId"],
                    references: SyncTable::Accounts,
                },
            ],
            SyncTable::AccountTypes | SyncTable::PaymentMethods | SyncTable::Banks => &[],
        }
    }
}

/// Result of validating one record's foreign keys. All failures are
/// accumulated so a rejected item carries its complete diagnostic.
#[derive(Debug, Default)]
pub struct FkValidation {
    pub errors: Vec<String>,
}

impl FkValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks that every foreign key a record carries points at a live row
/// owned by the acting principal.
pub struct OwnershipValidator {
    registry: Arc<SyncRegistry>,
}

impl OwnershipValidator {
    pub fn new(registry: Arc<SyncRegistry>) -> Self {
        Self { registry }
    }

    /// Validates the foreign keys present on `record`. Absent or null
    /// keys pass; each present key must resolve to a live row owned by
    /// `owner_id`.
    pub fn validate(
        &self,
        table: SyncTable,
        record: &Value,
        owner_id: i64,
    ) -> Result<FkValidation> {
        let mut errors = Vec::new();

        for fk in table.foreign_keys() {
            let Some(id) = fk_value(record, fk) else {
                continue;
            };

            match self.registry.store(fk.references).owner_of(id)? {
                None => errors.push(format!("{} id={} not found", fk.references, id)),
                Some(owner) if owner != owner_id => {
                    log::warn!(
                        "[fk security] cross-tenant reference rejected on {}: {} id={} belongs to user {}, not user {}",
                        table,
                        fk.references,
                        id,
                        owner,
                        owner_id
                    );
                    errors.push(format!(
                        "{} id={} does not belong to user",
                        fk.references, id
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(FkValidation { errors })
    }
}

/// Extracts a foreign key value, preferring the canonical field name and
/// falling back to its aliases. Null and non-positive values count as
/// absent, matching the client's use of 0 for "unset".
fn fk_value(record: &Value, fk: &ForeignKeyField) -> Option<i64> {
    let object = record.as_object()?;
    std::iter::once(fk.name)
        .chain(fk.aliases.iter().copied())
        .find_map(|name| object.get(name).and_then(wire::value_as_id))
        .filter(|id| *id > 0)
}
