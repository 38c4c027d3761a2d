//! Discount Service
//!
//! Ties the repository lookup to the pure evaluator and owns the
//! fault-collapsing policy: every business outcome becomes a
//! [`DiscountDecision`]; only storage faults surface as errors for the
//! transport layer to turn into a 500.

use sqlx::SqlitePool;
use tracing::{debug, error, info, warn};

use crate::core::config::PricingConfig;
use crate::db::repository::discount_code;
use crate::pricing::decision::{DiscountDecision, RejectionReason};
use crate::pricing::evaluator;
use crate::utils::time::now_millis;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct DiscountService {
    pool: SqlitePool,
    config: PricingConfig,
}

impl DiscountService {
    /// Configuration is injected here instead of read from process
    /// state, so the service is testable in isolation.
    pub fn new(pool: SqlitePool, config: PricingConfig) -> Self {
        Self { pool, config }
    }

    /// Evaluate a user-supplied code against an order subtotal.
    ///
    /// Read-only and advisory: `used_count` is not touched here. An
    /// `Err` means the storage lookup itself failed; all business
    /// outcomes are `Ok` decisions.
    pub async fn validate(&self, code: &str, subtotal: f64) -> AppResult<DiscountDecision> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            // Rejected before any storage lookup
            return Ok(self.rejected(trimmed, &RejectionReason::EmptyCode));
        }

        let record = discount_code::find_active_by_code(&self.pool, trimmed)
            .await
            .map_err(|e| {
                error!(code = %trimmed, error = %e, "Discount code lookup failed");
                AppError::from(e)
            })?;

        let Some(record) = record else {
            return Ok(self.rejected(trimmed, &RejectionReason::UnknownCode));
        };

        match evaluator::evaluate(&record, subtotal, now_millis()) {
            Ok(benefit) => {
                debug!(
                    code = %record.code,
                    amount = benefit.amount,
                    subtotal,
                    "Discount code accepted"
                );
                Ok(DiscountDecision::accepted(
                    &record,
                    &benefit,
                    &self.config.currency,
                ))
            }
            Err(reason) => {
                if reason == RejectionReason::Misconfigured {
                    // Data problem, not a user problem — make it visible
                    error!(
                        code = %record.code,
                        kind = ?record.kind,
                        "Discount code has no usable value for its kind"
                    );
                }
                Ok(self.rejected(&record.code, &reason))
            }
        }
    }

    /// Claim a redemption slot at order completion.
    ///
    /// Returns `false` when the cap was reached (or the code was
    /// disabled) between validation and completion.
    pub async fn redeem(&self, id: i64) -> AppResult<bool> {
        let record = discount_code::find_by_id(&self.pool, id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found(format!("Discount code {id} not found")))?;

        let redeemed = discount_code::redeem(&self.pool, record.id).await?;
        if redeemed {
            info!(code = %record.code, "Discount code redeemed");
        } else {
            warn!(code = %record.code, "Redemption refused: limit reached or code disabled");
        }
        Ok(redeemed)
    }

    fn rejected(&self, code: &str, reason: &RejectionReason) -> DiscountDecision {
        debug!(code = %code, reason = reason.log_label(), "Discount code rejected");
        DiscountDecision::rejected(reason, &self.config.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn migrated_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn service(pool: SqlitePool) -> DiscountService {
        DiscountService::new(
            pool,
            PricingConfig {
                currency: "zł".to_string(),
            },
        )
    }

    async fn insert_percentage_code(pool: &SqlitePool, code: &str, pct: f64) {
        let now = now_millis();
        sqlx::query(
            "INSERT INTO discount_code
             (code, description, kind, discount_percentage, used_count, is_active,
              created_at, updated_at)
             VALUES (?1, ?2, 'PERCENTAGE', ?3, 0, 1, ?4, ?4)",
        )
        .bind(code)
        .bind("Kod testowy")
        .bind(pct)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn empty_code_never_touches_storage() {
        // Pool without any schema: a lookup would fail loudly
        let bare_pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let svc = service(bare_pool);

        for input in ["", "   ", "\t\n"] {
            let decision = svc.validate(input, 100.0).await.unwrap();
            assert!(!decision.valid);
            assert_eq!(decision.message, "Podaj kod rabatowy.");
        }
    }

    #[tokio::test]
    async fn unknown_code_yields_invalid_decision() {
        let pool = migrated_pool().await;
        let svc = service(pool);

        let decision = svc.validate("NIEISTNIEJE", 100.0).await.unwrap();
        assert!(!decision.valid);
        assert_eq!(decision.message, "Nieprawidłowy kod rabatowy.");
    }

    #[tokio::test]
    async fn accepted_decision_carries_benefit_and_description() {
        let pool = migrated_pool().await;
        insert_percentage_code(&pool, "RABAT20", 20.0).await;
        let svc = service(pool);

        let decision = svc.validate("rabat20", 100.0).await.unwrap();
        assert!(decision.valid);
        assert_eq!(decision.code.as_deref(), Some("RABAT20"));
        assert_eq!(decision.discount_percentage, Some(20.0));
        assert_eq!(decision.discount_amount, Some(20.0));
        assert_eq!(decision.description.as_deref(), Some("Kod testowy"));
        assert!(decision.message.contains("20.00"));
    }

    #[tokio::test]
    async fn validation_is_idempotent_and_writes_nothing() {
        let pool = migrated_pool().await;
        insert_percentage_code(&pool, "RABAT20", 20.0).await;
        let svc = service(pool.clone());

        let first = svc.validate("RABAT20", 100.0).await.unwrap();
        let second = svc.validate("RABAT20", 100.0).await.unwrap();
        assert_eq!(first.message, second.message);
        assert_eq!(first.discount_amount, second.discount_amount);

        let used: i64 =
            sqlx::query_scalar("SELECT used_count FROM discount_code WHERE code = 'RABAT20'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(used, 0);
    }

    #[tokio::test]
    async fn misconfigured_code_is_rejected_not_zeroed() {
        let pool = migrated_pool().await;
        let now = now_millis();
        // Percentage kind with no percentage value
        sqlx::query(
            "INSERT INTO discount_code
             (code, kind, used_count, is_active, created_at, updated_at)
             VALUES ('ZEPSUTY', 'PERCENTAGE', 0, 1, ?1, ?1)",
        )
        .bind(now)
        .execute(&pool)
        .await
        .unwrap();
        let svc = service(pool);

        let decision = svc.validate("ZEPSUTY", 100.0).await.unwrap();
        assert!(!decision.valid);
        assert_eq!(decision.message, "Nieprawidłowy kod rabatowy.");
    }

    #[tokio::test]
    async fn storage_fault_surfaces_as_error() {
        let pool = migrated_pool().await;
        let svc = service(pool.clone());
        sqlx::query("DROP TABLE discount_code")
            .execute(&pool)
            .await
            .unwrap();

        let result = svc.validate("RABAT20", 100.0).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn redeem_unknown_id_is_not_found() {
        let pool = migrated_pool().await;
        let svc = service(pool);

        let result = svc.redeem(987_654).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
