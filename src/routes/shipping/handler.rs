use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use chrono::Utc;

use crate::{
    AppState,
    error::AppError,
    models::Address,
    services::easypost::{EasyPostAddress, Parcel, ShipmentRequest},
    utils::success_to_api_response,
};

use super::model::{
    CalculateShippingRequest, CalculateShippingResponse, ConnectionTestResponse,
    DEFAULT_WEIGHT_OZ, destination, sorted_rates,
};

#[axum::debug_handler]
pub async fn calculate_shipping(
    State(state): State<AppState>,
    payload: Result<Json<CalculateShippingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let missing_zip = || AppError::bad_request("Shipping address with zip code is required");

    let to_address = req.to_address.ok_or_else(missing_zip)?;
    let parsed: Address =
        serde_json::from_value(to_address.clone()).map_err(|_| missing_zip())?;
    let to = destination(&parsed).ok_or_else(missing_zip)?;
    let weight = req
        .weight
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(DEFAULT_WEIGHT_OZ);

    tracing::info!("Calculating shipping rates to {}", to.zip);
    let shipment = ShipmentRequest {
        to_address: to,
        from_address: EasyPostAddress::from(&state.config.ship_from),
        parcel: Parcel::clothing(weight),
    };

    let shipment = state
        .easypost
        .create_shipment(&shipment)
        .await
        .map_err(|e| {
            if e.mentions_address() {
                tracing::warn!("Carrier rejected shipping address: {}", e);
                AppError::BadRequest {
                    message: "Invalid shipping address. Please check your address details."
                        .into(),
                    details: Some(e.to_string()),
                }
            } else {
                AppError::internal(
                    "Failed to calculate shipping rates",
                    &e,
                    state.config.error_details(&e),
                )
            }
        })?;

    let rates = sorted_rates(shipment.rates);
    tracing::info!("Found {} shipping rates", rates.len());

    Ok(success_to_api_response(CalculateShippingResponse {
        rates,
        shipment_id: shipment.id,
        from_address: state.config.ship_from.clone(),
        to_address,
    }))
}

/// 创建一个固定地址，用于检查 EasyPost 凭据是否可用
#[axum::debug_handler]
pub async fn test_connection(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let address = EasyPostAddress {
        street1: "388 Townsend St".into(),
        street2: None,
        city: "San Francisco".into(),
        state: "CA".into(),
        zip: "94107".into(),
        country: "US".into(),
    };

    let test_address = state
        .easypost
        .create_address(&address)
        .await
        .map_err(|e| AppError::internal("EasyPost API connection failed", &e, Some(e.to_string())))?;

    Ok(success_to_api_response(ConnectionTestResponse {
        message: "EasyPost API connection successful",
        test_address,
        timestamp: Utc::now(),
    }))
}
