//! Discount API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::AppState;
use crate::pricing::DiscountDecision;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
pub struct ValidateDiscountRequest {
    pub code: String,
    /// Pre-discount order total in PLN
    #[validate(range(min = 0.0))]
    pub subtotal: f64,
}

#[derive(Debug, Deserialize)]
pub struct RedeemDiscountRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct RedeemDiscountResponse {
    pub redeemed: bool,
}

/// POST /api/discounts/validate - evaluate a code against a subtotal
///
/// Business outcomes (valid and invalid alike) respond 200 with the
/// decision in the body; only infrastructure faults become a 500, still
/// carrying a `valid: false` decision so the storefront renders one
/// shape everywhere.
pub async fn validate(
    State(state): State<AppState>,
    Json(payload): Json<ValidateDiscountRequest>,
) -> Response {
    if payload.validate().is_err() {
        return (StatusCode::OK, Json(DiscountDecision::invalid_input())).into_response();
    }

    match state
        .discounts()
        .validate(&payload.code, payload.subtotal)
        .await
    {
        Ok(decision) => (StatusCode::OK, Json(decision)).into_response(),
        Err(err) => {
            // Already logged at the source; the client gets no details
            tracing::error!(error = %err, "Discount validation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DiscountDecision::infrastructure_failure()),
            )
                .into_response()
        }
    }
}

/// POST /api/discounts/redeem - claim a redemption slot
///
/// Called by the checkout completion flow after payment, not during
/// validation. `redeemed: false` means the cap filled up in between.
pub async fn redeem(
    State(state): State<AppState>,
    Json(payload): Json<RedeemDiscountRequest>,
) -> AppResult<Json<RedeemDiscountResponse>> {
    if payload.id <= 0 {
        return Err(AppError::validation("Invalid discount code id"));
    }

    let redeemed = state.discounts().redeem(payload.id).await?;
    Ok(Json(RedeemDiscountResponse { redeemed }))
}
