//! Shared helpers for time handling and the client wire format.

pub mod time_utils;
pub mod wire;
