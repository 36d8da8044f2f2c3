//! Payment methods module - the ways money moves.

mod payment_methods_model;

pub use payment_methods_model::{
    NewPaymentMethod, PaymentMethod, PaymentMethodData, PaymentMethodUsage,
};
