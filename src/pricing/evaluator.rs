//! Discount Evaluator
//!
//! Pure validation and calculation logic for a fetched discount code.
//! Uses rust_decimal for the arithmetic, stores as f64. No rounding is
//! performed here — display formatting is the caller's concern.
//!
//! Checks run in a fixed order and short-circuit on the first failure:
//! expiry, usage limit, minimum order, then the value calculation.

use rust_decimal::prelude::*;

use crate::db::models::{DiscountCode, DiscountKind};
use crate::pricing::decision::RejectionReason;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Computed benefit of a valid code
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountBenefit {
    /// Percentage applied, present only for the percentage kind
    pub percentage: Option<f64>,
    /// Monetary reduction in PLN
    pub amount: f64,
}

/// Evaluate a fetched code against an order subtotal.
///
/// The record is read-only; redemption accounting happens elsewhere
/// ([`crate::db::repository::discount_code::redeem`]). Two concurrent
/// evaluations of a nearly-exhausted code may both pass here — the hard
/// cap lives in the atomic redeem UPDATE.
pub fn evaluate(
    code: &DiscountCode,
    subtotal: f64,
    now_ms: i64,
) -> Result<DiscountBenefit, RejectionReason> {
    if let Some(expires_at) = code.expires_at
        && expires_at < now_ms
    {
        return Err(RejectionReason::Expired);
    }

    if let Some(limit) = code.usage_limit
        && code.used_count >= limit
    {
        return Err(RejectionReason::UsageLimitReached);
    }

    if let Some(required) = code.min_order_amount
        && subtotal < required
    {
        return Err(RejectionReason::BelowMinimum { required });
    }

    calculate_benefit(code, subtotal)
}

/// Compute the monetary reduction for a code that passed all checks.
///
/// A kind without a usable value column is rejected rather than
/// silently approved at zero.
fn calculate_benefit(
    code: &DiscountCode,
    subtotal: f64,
) -> Result<DiscountBenefit, RejectionReason> {
    match code.kind {
        DiscountKind::Percentage => match code.discount_percentage {
            Some(pct) if pct > 0.0 && pct <= 100.0 => {
                let amount = to_decimal(subtotal) * to_decimal(pct) / Decimal::ONE_HUNDRED;
                Ok(DiscountBenefit {
                    percentage: Some(pct),
                    amount: amount.to_f64().unwrap_or_default(),
                })
            }
            _ => Err(RejectionReason::Misconfigured),
        },
        DiscountKind::Fixed => match code.discount_amount {
            // Flat value, deliberately unmodified by the subtotal
            Some(amount) if amount >= 0.0 => Ok(DiscountBenefit {
                percentage: None,
                amount,
            }),
            _ => Err(RejectionReason::Misconfigured),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_756_500_000_000;

    fn make_code(kind: DiscountKind) -> DiscountCode {
        DiscountCode {
            id: 1,
            code: "LATO20".to_string(),
            description: Some("Letnia promocja".to_string()),
            kind,
            discount_percentage: None,
            discount_amount: None,
            min_order_amount: None,
            usage_limit: None,
            used_count: 0,
            expires_at: None,
            is_active: true,
            created_at: NOW - 1_000,
            updated_at: NOW - 1_000,
        }
    }

    fn percentage_code(pct: f64) -> DiscountCode {
        DiscountCode {
            discount_percentage: Some(pct),
            ..make_code(DiscountKind::Percentage)
        }
    }

    fn fixed_code(amount: f64) -> DiscountCode {
        DiscountCode {
            discount_amount: Some(amount),
            ..make_code(DiscountKind::Fixed)
        }
    }

    #[test]
    fn percentage_benefit_is_proportional() {
        let code = percentage_code(20.0);
        let benefit = evaluate(&code, 100.0, NOW).unwrap();
        assert_eq!(benefit.percentage, Some(20.0));
        assert_eq!(benefit.amount, 20.0);
    }

    #[test]
    fn fixed_benefit_ignores_subtotal_magnitude() {
        let code = fixed_code(15.0);
        assert_eq!(evaluate(&code, 100.0, NOW).unwrap().amount, 15.0);
        assert_eq!(evaluate(&code, 10_000.0, NOW).unwrap().amount, 15.0);
        assert_eq!(evaluate(&code, 100.0, NOW).unwrap().percentage, None);
    }

    #[test]
    fn expired_code_is_rejected_regardless_of_other_fields() {
        let code = DiscountCode {
            expires_at: Some(NOW - 1),
            ..percentage_code(20.0)
        };
        assert_eq!(evaluate(&code, 100.0, NOW), Err(RejectionReason::Expired));
    }

    #[test]
    fn expiry_is_strict() {
        // Exactly at the expiry instant the code is still usable
        let code = DiscountCode {
            expires_at: Some(NOW),
            ..percentage_code(20.0)
        };
        assert!(evaluate(&code, 100.0, NOW).is_ok());
    }

    #[test]
    fn exhausted_usage_limit_is_rejected() {
        let code = DiscountCode {
            usage_limit: Some(100),
            used_count: 100,
            ..fixed_code(15.0)
        };
        assert_eq!(
            evaluate(&code, 100.0, NOW),
            Err(RejectionReason::UsageLimitReached)
        );
    }

    #[test]
    fn remaining_usage_passes() {
        let code = DiscountCode {
            usage_limit: Some(100),
            used_count: 99,
            ..fixed_code(15.0)
        };
        assert!(evaluate(&code, 100.0, NOW).is_ok());
    }

    #[test]
    fn minimum_order_boundary() {
        let code = DiscountCode {
            min_order_amount: Some(50.0),
            ..percentage_code(10.0)
        };
        assert_eq!(
            evaluate(&code, 49.99, NOW),
            Err(RejectionReason::BelowMinimum { required: 50.0 })
        );
        // Exactly the minimum qualifies
        assert!(evaluate(&code, 50.0, NOW).is_ok());
    }

    #[test]
    fn checks_run_in_order_expiry_first() {
        // Expired AND exhausted AND below minimum: expiry wins
        let code = DiscountCode {
            expires_at: Some(NOW - 1),
            usage_limit: Some(1),
            used_count: 1,
            min_order_amount: Some(500.0),
            ..percentage_code(10.0)
        };
        assert_eq!(evaluate(&code, 10.0, NOW), Err(RejectionReason::Expired));
    }

    #[test]
    fn usage_limit_checked_before_minimum() {
        let code = DiscountCode {
            usage_limit: Some(1),
            used_count: 1,
            min_order_amount: Some(500.0),
            ..percentage_code(10.0)
        };
        assert_eq!(
            evaluate(&code, 10.0, NOW),
            Err(RejectionReason::UsageLimitReached)
        );
    }

    #[test]
    fn percentage_kind_without_percentage_is_misconfigured() {
        let code = make_code(DiscountKind::Percentage);
        assert_eq!(
            evaluate(&code, 100.0, NOW),
            Err(RejectionReason::Misconfigured)
        );
    }

    #[test]
    fn percentage_out_of_range_is_misconfigured() {
        assert_eq!(
            evaluate(&percentage_code(0.0), 100.0, NOW),
            Err(RejectionReason::Misconfigured)
        );
        assert_eq!(
            evaluate(&percentage_code(150.0), 100.0, NOW),
            Err(RejectionReason::Misconfigured)
        );
        assert!(evaluate(&percentage_code(100.0), 100.0, NOW).is_ok());
    }

    #[test]
    fn fixed_kind_without_amount_is_misconfigured() {
        let code = make_code(DiscountKind::Fixed);
        assert_eq!(
            evaluate(&code, 100.0, NOW),
            Err(RejectionReason::Misconfigured)
        );
    }

    #[test]
    fn percentage_precision_on_odd_subtotal() {
        // 33% of 99.99 zł: exact Decimal arithmetic, no premature rounding
        let benefit = evaluate(&percentage_code(33.0), 99.99, NOW).unwrap();
        assert!((benefit.amount - 32.9967).abs() < 1e-9);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let code = percentage_code(20.0);
        let first = evaluate(&code, 100.0, NOW).unwrap();
        let second = evaluate(&code, 100.0, NOW).unwrap();
        assert_eq!(first, second);
    }
}
