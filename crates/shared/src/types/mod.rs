//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AmountError, from_storage, parse_amount, to_storage};
