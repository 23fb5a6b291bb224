use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use studio_shared::{EstimateBreakdown, EstimateInput, PriceTable};

use crate::error::ApiError;
use crate::AppState;

/// Prices an estimate with the server's table. Out-of-range values inside a
/// JSON object are clamped or defaulted, never rejected; only a body that is
/// not an object at all gets an error.
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EstimateInput>, JsonRejection>,
) -> Result<Json<EstimateBreakdown>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.price_table.breakdown(&input)))
}

pub async fn get_price_table(State(state): State<Arc<AppState>>) -> Json<PriceTable> {
    Json(state.price_table.clone())
}
