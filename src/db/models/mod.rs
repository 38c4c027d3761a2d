//! Database Models

pub mod discount_code;

pub use discount_code::{DiscountCode, DiscountKind};
