use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Value, json};
use sqlx::PgPool;

use crate::{
    AppState,
    models::{User, UserProfile},
};

use super::model::{
    CallbackResponse, CallbackStatus, PassThrough, ProfileRequest, RequestedInfo,
    ValidationSuccess,
};
use super::validation::validate;

async fn save_profile(pool: &PgPool, wallet: &str, info: &RequestedInfo) -> Result<(), sqlx::Error> {
    let user = User::upsert(pool, wallet, info.email()).await?;
    UserProfile::upsert(pool, user.id, info.profile_data()).await?;
    Ok(())
}

/// 钱包在提交交易前回调此接口；出错时也返回 400，避免中断钱包流程
pub async fn validate_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Unreadable profile validation request: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": {"server": "Server error validating data. Please try again."}
                })),
            )
                .into_response();
        }
    };

    let errors = validate(&req.requested_info);
    if !errors.is_empty() {
        tracing::info!("Profile validation failed: {:?}", errors);
        return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
    }

    let info = &req.requested_info;
    if let (Some(wallet), Some(_), Some(_)) = (info.wallet(), info.email(), info.address()) {
        match save_profile(&state.pool, wallet, info).await {
            Ok(()) => tracing::info!("Profile stored for wallet {}", wallet),
            Err(e) => tracing::error!("Failed to store profile for wallet {}: {}", wallet, e),
        }
    }

    Json(ValidationSuccess {
        request: PassThrough {
            calls: req.calls,
            chain_id: req.chain_id,
            version: req.version,
        },
    })
    .into_response()
}

pub async fn profile_callback(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let failed = || {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CallbackResponse {
                success: false,
                message: None,
                error: Some("Failed to process profile data"),
                timestamp: Utc::now(),
            }),
        )
            .into_response()
    };

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::error!("Unreadable profile callback: {}", rejection.body_text());
            return failed();
        }
    };
    tracing::info!("Profile callback received: {}", body);

    if let Ok(req) = serde_json::from_value::<ProfileRequest>(body) {
        let info = &req.requested_info;
        if let Some(wallet) = info.wallet() {
            if let Err(e) = save_profile(&state.pool, wallet, info).await {
                tracing::error!("Failed to store profile for wallet {}: {}", wallet, e);
                return failed();
            }
        }
    }

    Json(CallbackResponse {
        success: true,
        message: Some("Profile data received and processed"),
        error: None,
        timestamp: Utc::now(),
    })
    .into_response()
}

pub async fn callback_status() -> Json<CallbackStatus> {
    Json(CallbackStatus {
        message: "Profiles callback endpoint",
        status: "active",
        timestamp: Utc::now(),
    })
}
