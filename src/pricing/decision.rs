//! Discount Decision
//!
//! Value object returned for every validation request. The storefront
//! UI is Polish, so client-facing messages are Polish; log labels stay
//! English.

use serde::Serialize;

use crate::db::models::{DiscountCode, DiscountKind};
use crate::pricing::evaluator::DiscountBenefit;

/// Why a code was turned down.
///
/// The client sees a collapsed message (unknown and misconfigured codes
/// are indistinguishable by design), but the reason is kept as a typed
/// enum so logs can tell the cases apart.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Empty or whitespace-only input, rejected before any lookup
    EmptyCode,
    /// No active code with this name
    UnknownCode,
    /// `expires_at` lies strictly before the evaluation time
    Expired,
    /// `used_count` reached `usage_limit`
    UsageLimitReached,
    /// Subtotal below the code's minimum order amount
    BelowMinimum { required: f64 },
    /// Value columns inconsistent with the kind; never approved at zero
    Misconfigured,
}

impl RejectionReason {
    /// Stable label for structured logs
    pub fn log_label(&self) -> &'static str {
        match self {
            RejectionReason::EmptyCode => "empty_code",
            RejectionReason::UnknownCode => "unknown_code",
            RejectionReason::Expired => "expired",
            RejectionReason::UsageLimitReached => "usage_limit_reached",
            RejectionReason::BelowMinimum { .. } => "below_minimum",
            RejectionReason::Misconfigured => "misconfigured",
        }
    }
}

/// Per-request evaluation outcome, mirrored as the HTTP response body
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscountDecision {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiscountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DiscountDecision {
    /// Invalid decision for a rejected code
    pub fn rejected(reason: &RejectionReason, currency: &str) -> Self {
        let message = match reason {
            RejectionReason::EmptyCode => "Podaj kod rabatowy.".to_string(),
            RejectionReason::UnknownCode | RejectionReason::Misconfigured => {
                "Nieprawidłowy kod rabatowy.".to_string()
            }
            RejectionReason::Expired => "Kod rabatowy wygasł.".to_string(),
            RejectionReason::UsageLimitReached => {
                "Kod rabatowy został już wykorzystany.".to_string()
            }
            RejectionReason::BelowMinimum { required } => {
                format!("Minimalna wartość zamówienia dla tego kodu to {required:.2} {currency}.")
            }
        };
        Self {
            valid: false,
            message,
            ..Self::default()
        }
    }

    /// Invalid decision with a malformed-request message
    pub fn invalid_input() -> Self {
        Self {
            valid: false,
            message: "Nieprawidłowa wartość zamówienia.".to_string(),
            ..Self::default()
        }
    }

    /// Generic failure decision for infrastructure faults; pairs with
    /// an HTTP 500 at the transport boundary
    pub fn infrastructure_failure() -> Self {
        Self {
            valid: false,
            message: "Wystąpił błąd podczas weryfikacji kodu. Spróbuj ponownie.".to_string(),
            ..Self::default()
        }
    }

    /// Successful decision carrying the computed benefit
    pub fn accepted(code: &DiscountCode, benefit: &DiscountBenefit, currency: &str) -> Self {
        Self {
            valid: true,
            message: format!(
                "Kod rabatowy zastosowany. Oszczędzasz {:.2} {currency}!",
                benefit.amount
            ),
            code: Some(code.code.clone()),
            kind: Some(code.kind),
            discount_percentage: benefit.percentage,
            discount_amount: Some(benefit.amount),
            description: code.description.clone(),
        }
    }
}
