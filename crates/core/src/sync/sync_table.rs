//! The closed set of tables that participate in synchronization.

use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Entity types a client may push to or pull from.
///
/// Table routing is an enum rather than a name-keyed registry so that a
/// missing arm is a compile error, not a runtime surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTable {
    AccountTypes,
    AccountDescriptions,
    Accounts,
    PaymentMethods,
    Banks,
    Payments,
}

impl SyncTable {
    pub const ALL: [SyncTable; 6] = [
        SyncTable::AccountTypes,
        SyncTable::AccountDescriptions,
        SyncTable::Accounts,
        SyncTable::PaymentMethods,
        SyncTable::Banks,
        SyncTable::Payments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SyncTable::AccountTypes => "account_types",
            SyncTable::AccountDescriptions => "account_descriptions",
            SyncTable::Accounts => "accounts",
            SyncTable::PaymentMethods => "payment_methods",
            SyncTable::Banks => "banks",
            SyncTable::Payments => "payments",
        }
    }
}

impl fmt::Display for SyncTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncTable {
    type Err = ValidationError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        SyncTable::ALL
            .into_iter()
            .find(|table| table.as_str() == input)
            .ok_or_else(|| ValidationError::UnsupportedTable(input.to_string()))
    }
}
