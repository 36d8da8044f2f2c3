//! Accounts module - payable/receivable obligations and credit cards.

mod accounts_model;

pub use accounts_model::{Account, AccountData, NewAccount};

#[cfg(test)]
mod accounts_model_tests;
