use axum::{
    Json,
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    response::IntoResponse,
};

use crate::{
    AppState,
    error::AppError,
    models::{NewOrder, Order, PlaceOrderOutcome, Product, User},
    money::{dollars_to_cents, usdc_to_cents},
    utils::success_to_api_response,
};

use super::model::{
    CreateOrderRequest, CreateOrderResponse, ListOrdersQuery, ListOrdersResponse,
    MAX_SHIPPING_COST_CENTS, MISSING_FIELDS,
};

#[axum::debug_handler]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let req = req
        .validate()
        .ok_or_else(|| AppError::bad_request(MISSING_FIELDS))?;
    let shipping_cost = dollars_to_cents(req.shipping_cost)
        .filter(|cents| (0..=MAX_SHIPPING_COST_CENTS).contains(cents))
        .ok_or_else(|| AppError::bad_request("Invalid shipping cost"))?;

    let failed = |e: sqlx::Error| {
        AppError::internal("Failed to create order", &e, state.config.error_details(&e))
    };

    let user = User::find_or_create(&state.pool, &req.wallet_address)
        .await
        .map_err(failed)?;

    let product = Product::find_active_by_id(&state.pool, req.product_id)
        .await
        .map_err(failed)?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    if !product.in_stock() {
        return Err(AppError::bad_request("Product is out of stock"));
    }

    let new_order = NewOrder {
        user_id: user.id,
        product_id: product.id,
        product_name: product.name,
        product_price: usdc_to_cents(product.price_usdc),
        shipping_address: req.shipping_address,
        shipping_cost,
        shipping_method: req.shipping_method,
        easypost_rate_id: req.selected_rate_id,
        transaction_hash: req.transaction_hash,
    };
    if new_order.total_amount().is_none() {
        return Err(AppError::bad_request("Invalid shipping cost"));
    }

    let order = match Order::place(&state.pool, new_order).await.map_err(failed)? {
        PlaceOrderOutcome::Placed(order) => order,
        PlaceOrderOutcome::OutOfStock => {
            tracing::warn!("Product {} sold out while placing order", product.id);
            return Err(AppError::bad_request("Product is out of stock"));
        }
    };

    tracing::info!(
        "Order {} created for wallet {}",
        order.order_number,
        req.wallet_address
    );
    Ok(success_to_api_response(CreateOrderResponse {
        order: order.into(),
        message: "Order created successfully",
    }))
}

#[axum::debug_handler]
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<ListOrdersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let wallet_address = query
        .wallet_address
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .ok_or_else(|| AppError::bad_request("Wallet address is required"))?;

    let failed = |e: sqlx::Error| {
        AppError::internal("Failed to fetch orders", &e, state.config.error_details(&e))
    };

    let Some(user) = User::find_by_wallet(&state.pool, &wallet_address)
        .await
        .map_err(failed)?
    else {
        return Ok(success_to_api_response(ListOrdersResponse {
            orders: Vec::new(),
            message: Some("No orders found for this wallet"),
        }));
    };

    let orders = Order::list_by_user(&state.pool, user.id)
        .await
        .map_err(failed)?;

    Ok(success_to_api_response(ListOrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
        message: None,
    }))
}
