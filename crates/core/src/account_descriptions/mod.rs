//! Account descriptions module - subcategories of account types.

mod account_descriptions_model;

pub use account_descriptions_model::{
    AccountDescription, AccountDescriptionData, NewAccountDescription,
};
