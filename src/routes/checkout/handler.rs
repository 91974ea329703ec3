use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{AppState, error::AppError, utils::success_to_api_response};

use super::model::{CreateChargeRequest, CreateChargeResponse};

#[axum::debug_handler]
pub async fn create_charge(
    State(state): State<AppState>,
    payload: Result<Json<CreateChargeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let charge = req.into_charge(&state.config.store_name, &state.config.store_source_tag)?;

    tracing::info!(
        "Creating charge for {} ({} {})",
        charge.name,
        charge.local_price.amount,
        charge.local_price.currency
    );
    let charge = state.commerce.create_charge(&charge).await.map_err(|e| {
        let message = e.to_string();
        AppError::internal(message, &e, None)
    })?;

    Ok(success_to_api_response(CreateChargeResponse {
        id: charge.get("id").cloned().unwrap_or_default(),
        charge,
    }))
}
