use axum::{
    Router,
    routing::{delete, get, post, put},
};
#[cfg(debug_assertions)]
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    middleware::{admin_auth_middleware, log_errors},
    routes,
};

// 店面公开路由
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(routes::products::list_products))
        .route("/products/counts", get(routes::products::product_counts))
        .route(
            "/orders",
            post(routes::orders::create_order).get(routes::orders::list_orders),
        )
        .route(
            "/shipping/calculate",
            post(routes::shipping::calculate_shipping).get(routes::shipping::test_connection),
        )
        .route("/checkout/create-charge", post(routes::checkout::create_charge))
        .route("/admin/auth", post(routes::admin::authenticate))
        .nest("/profiles", routes::profiles::router())
}

// 需要管理员会话的路由
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/admin/products",
            get(routes::admin::list_products)
                .post(routes::admin::create_product)
                .put(routes::admin::update_product),
        )
        .route("/admin/products/{id}", delete(routes::admin::delete_product))
        .route("/admin/orders", get(routes::admin::list_orders))
        .route(
            "/admin/orders/{id}/status",
            put(routes::admin::update_order_status),
        )
        .route(
            "/admin/orders/{id}/shipping",
            put(routes::admin::update_order_shipping),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            admin_auth_middleware,
        ))
}

/// 不含限流层，限流在 main 中按部署环境添加
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(public_routes())
        .merge(admin_routes(state.clone()));

    let router = Router::new()
        .nest(&state.config.api_base_uri, api)
        .layer(axum::middleware::from_fn(log_errors));

    // 开发环境允许所有来源
    #[cfg(debug_assertions)]
    let router = router.layer(CorsLayer::permissive());

    router.with_state(state)
}
