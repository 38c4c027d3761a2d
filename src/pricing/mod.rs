//! Pricing Module
//!
//! Discount-code evaluation: a pure evaluator over fetched records, the
//! decision value object, and the service wiring them to storage.

pub mod decision;
pub mod evaluator;
pub mod service;

pub use decision::{DiscountDecision, RejectionReason};
pub use evaluator::DiscountBenefit;
pub use service::DiscountService;
