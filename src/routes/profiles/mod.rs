mod handler;
mod model;
mod validation;

use axum::{
    Router,
    http::{Method, header},
    routing::post,
};
use tower_http::cors::{Any, CorsLayer};

use crate::AppState;

pub use handler::{callback_status, profile_callback, validate_profile};

/// 钱包回调来自任意来源
pub fn router() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/validation", post(validate_profile).layer(cors))
        .route("/callback", post(profile_callback).get(callback_status))
}
