//! Discount Code Model

use serde::{Deserialize, Serialize};

/// Discount kind enum
///
/// Exactly one of the value columns is authoritative per kind:
/// `discount_percentage` for [`DiscountKind::Percentage`],
/// `discount_amount` for [`DiscountKind::Fixed`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// Discount code entity
///
/// Read-only from the storefront's perspective apart from the atomic
/// `used_count` increment performed at order completion.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DiscountCode {
    pub id: i64,
    /// Case-insensitive identifier (UNIQUE COLLATE NOCASE in the schema)
    pub code: String,
    /// Display text shown to the customer on success
    pub description: Option<String>,
    pub kind: DiscountKind,
    /// Percentage in (0, 100], meaningful only for the percentage kind
    pub discount_percentage: Option<f64>,
    /// Flat amount in PLN, meaningful only for the fixed kind
    pub discount_amount: Option<f64>,
    /// Minimum order subtotal required to redeem, if any
    pub min_order_amount: Option<f64>,
    /// Ceiling on total redemptions; NULL means unlimited
    pub usage_limit: Option<i64>,
    pub used_count: i64,
    /// Milliseconds since epoch; NULL means no expiry
    pub expires_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
