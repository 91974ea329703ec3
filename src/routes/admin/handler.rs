use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    models::{AdminSession, Order, Product, ShippingUpdate},
    utils::{generate_session_token, success_to_api_response, wallets_match},
};

use super::model::{
    AdminAuthRequest, AdminAuthResponse, MessageResponse, OrderListResponse, OrderResponse,
    ProductListResponse, ProductPayload, ProductResponse, UpdateOrderShippingRequest,
    UpdateOrderStatusRequest,
};

const FOREIGN_KEY_VIOLATION: &str = "23503";

#[axum::debug_handler]
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<AdminAuthRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let wallet_address = payload
        .ok()
        .and_then(|Json(req)| req.wallet_address)
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty());

    let Some(wallet_address) =
        wallet_address.filter(|w| wallets_match(w, &state.config.admin_wallet_address))
    else {
        tracing::warn!("Admin authentication rejected");
        return Err(AppError::Unauthorized(
            "Unauthorized: Invalid admin wallet address".into(),
        ));
    };

    match AdminSession::purge_expired(&state.pool).await {
        Ok(purged) if purged > 0 => tracing::debug!("Purged {} expired admin sessions", purged),
        Ok(_) => {}
        Err(e) => tracing::warn!("Failed to purge expired admin sessions: {}", e),
    }

    let token = generate_session_token();
    AdminSession::create(
        &state.pool,
        &wallet_address,
        &token,
        state.config.admin_session_expiration(),
    )
    .await
    .map_err(|e| {
        AppError::internal(
            "Failed to create admin session",
            &e,
            state.config.error_details(&e),
        )
    })?;

    tracing::info!("Admin session created for {}", wallet_address);
    Ok(success_to_api_response(AdminAuthResponse {
        session_token: token,
        wallet_address,
        message: "Admin authentication successful",
    }))
}

#[axum::debug_handler]
pub async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = Product::list_all(&state.pool).await.map_err(|e| {
        AppError::internal("Failed to fetch products", &e, state.config.error_details(&e))
    })?;

    Ok(success_to_api_response(ProductListResponse { products }))
}

#[axum::debug_handler]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let new_product = payload.into_new_product()?;

    let product = Product::create(&state.pool, &new_product)
        .await
        .map_err(|e| {
            AppError::internal("Failed to create product", &e, state.config.error_details(&e))
        })?;

    Ok(success_to_api_response(ProductResponse {
        product,
        message: "Product created successfully",
    }))
}

#[axum::debug_handler]
pub async fn update_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let (id, changes) = payload.into_changes()?;

    let product = Product::update(&state.pool, id, &changes)
        .await
        .map_err(|e| {
            AppError::internal("Failed to update product", &e, state.config.error_details(&e))
        })?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    tracing::info!("Updated product {}", product.id);
    Ok(success_to_api_response(ProductResponse {
        product,
        message: "Product updated successfully",
    }))
}

#[axum::debug_handler]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = match Product::delete(&state.pool, id).await {
        Ok(deleted) => deleted,
        Err(e)
            if e.as_database_error()
                .and_then(|db| db.code())
                .is_some_and(|code| code == FOREIGN_KEY_VIOLATION) =>
        {
            return Err(AppError::bad_request(
                "Product has existing orders; deactivate it instead",
            ));
        }
        Err(e) => {
            return Err(AppError::internal(
                "Failed to delete product",
                &e,
                state.config.error_details(&e),
            ));
        }
    };

    if !deleted {
        return Err(AppError::NotFound("Product not found".into()));
    }

    tracing::info!("Deleted product {}", id);
    Ok(success_to_api_response(MessageResponse {
        message: "Product deleted successfully",
    }))
}

#[axum::debug_handler]
pub async fn list_orders(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let orders = Order::list_all(&state.pool).await.map_err(|e| {
        AppError::internal("Failed to fetch orders", &e, state.config.error_details(&e))
    })?;

    Ok(success_to_api_response(OrderListResponse { orders }))
}

#[axum::debug_handler]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateOrderStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let status = req
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request("Status is required"))?;

    let order = Order::update_status(&state.pool, id, &status, req.notes.as_deref())
        .await
        .map_err(|e| {
            AppError::internal(
                "Failed to update order status",
                &e,
                state.config.error_details(&e),
            )
        })?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    tracing::info!("Order {} moved to {}", order.order_number, status);
    Ok(success_to_api_response(OrderResponse {
        order,
        message: "Order status updated",
    }))
}

#[axum::debug_handler]
pub async fn update_order_shipping(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateOrderShippingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let update = ShippingUpdate::from(req);

    let order = Order::update_shipping(&state.pool, id, &update)
        .await
        .map_err(|e| {
            AppError::internal(
                "Failed to update order shipping",
                &e,
                state.config.error_details(&e),
            )
        })?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    Ok(success_to_api_response(OrderResponse {
        order,
        message: "Order shipping updated",
    }))
}
