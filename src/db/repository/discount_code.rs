//! Discount Code Repository

use super::RepoResult;
use crate::db::models::DiscountCode;
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

/// Find the unique active code matching a case-insensitive lookup.
///
/// Inactive codes are filtered here, so the caller cannot distinguish
/// "does not exist" from "exists but disabled".
pub async fn find_active_by_code(
    pool: &SqlitePool,
    code: &str,
) -> RepoResult<Option<DiscountCode>> {
    let normalized = code.trim().to_lowercase();
    let row = sqlx::query_as::<_, DiscountCode>(
        "SELECT * FROM discount_code WHERE LOWER(code) = ?1 AND is_active = 1 LIMIT 1",
    )
    .bind(&normalized)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiscountCode>> {
    let row = sqlx::query_as::<_, DiscountCode>("SELECT * FROM discount_code WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Atomically claim one redemption slot for a code.
///
/// The usage cap is enforced inside this single UPDATE: two concurrent
/// redemptions of a code with one slot left cannot both succeed.
/// Validation stays advisory; this is the only write the storefront
/// performs against discount codes.
///
/// Returns `false` when the code is inactive or its limit is exhausted.
pub async fn redeem(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = now_millis();
    let result = sqlx::query(
        "UPDATE discount_code
         SET used_count = used_count + 1, updated_at = ?1
         WHERE id = ?2
           AND is_active = 1
           AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
