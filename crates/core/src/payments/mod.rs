//! Payments module - realized payment events against accounts.

mod payments_model;

pub use payments_model::{NewPayment, Payment, PaymentData};
