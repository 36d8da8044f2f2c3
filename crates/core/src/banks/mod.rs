//! Banks module - the user's bank account records.

mod banks_model;

pub use banks_model::{Bank, BankData, NewBank};
