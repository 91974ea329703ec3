use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{AppState, error::AppError, models::AdminSession, utils::wallets_match};

const INVALID_SESSION: &str = "Unauthorized: Invalid or expired admin session";

/// 校验管理员会话令牌，通过后把会话放入请求扩展
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(AppError::Unauthorized(INVALID_SESSION.into()));
    };

    let session = AdminSession::find_valid(&state.pool, bearer.token())
        .await
        .map_err(|e| {
            AppError::internal(
                "Failed to validate admin session",
                &e,
                state.config.error_details(&e),
            )
        })?;

    match session {
        Some(session) if wallets_match(&session.wallet_address, &state.config.admin_wallet_address) => {
            tracing::debug!("Admin session accepted for {}", session.wallet_address);
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Some(session) => {
            tracing::warn!(
                "Rejected session for non-admin wallet {}",
                session.wallet_address
            );
            Err(AppError::Unauthorized(INVALID_SESSION.into()))
        }
        None => Err(AppError::Unauthorized(INVALID_SESSION.into())),
    }
}
