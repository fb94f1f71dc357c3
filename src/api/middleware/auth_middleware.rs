use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::infrastructure::app_state::AppState;

/// Header carrying the internal service token
pub const SERVICE_TOKEN_HEADER: &str = "X-Service-Token";

/// Authenticated player, inserted into request extensions by `auth_middleware`
#[derive(Debug, Clone, Copy)]
pub struct AuthAccount(pub Uuid);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Require a valid player JWT
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let account_id = state.jwt_service.verify(token).map_err(|e| {
        tracing::debug!("Rejected player token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    request.extensions_mut().insert(AuthAccount(account_id));

    Ok(next.run(request).await)
}

/// Require the shared service token (`X-Service-Token` or bearer)
pub async fn service_auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let headers = request.headers();
    let token = headers
        .get(SERVICE_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .or_else(|| bearer_token(headers))
        .ok_or_else(|| ApiError::unauthorized("Missing service token"))?;

    if !state.service_tokens.validate(token) {
        tracing::warn!("Rejected internal request with invalid service token");
        return Err(ApiError::unauthorized("Invalid service token"));
    }

    Ok(next.run(request).await)
}
