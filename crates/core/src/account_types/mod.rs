//! Account types module - top-level spending/income categories.

mod account_types_model;

pub use account_types_model::{AccountType, AccountTypeData, NewAccountType};
