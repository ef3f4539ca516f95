use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::SET_COOKIE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::api::cookies::{auth_cookie, cookie_token, expired_auth_cookie, header_value};
use crate::api::extract::BearerToken;
use crate::api::relay;
use crate::backend::dto::TokenResponse;
use crate::backend::BackendRequest;
use crate::error::AppError;
use crate::models::LoginRequest;
use crate::state::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    info!("login attempt for {}", req.email);
    let reply = state
        .backend
        .send(BackendRequest::post("/auth/login").json(&req)?)
        .await?;

    if !reply.status.is_success() {
        warn!("login rejected for {}: {}", req.email, reply.status);
        let detail = reply.detail().unwrap_or_else(|| "Login failed".to_string());
        return Ok((reply.status, Json(json!({ "error": detail }))).into_response());
    }

    let token: TokenResponse = serde_json::from_value(reply.body)
        .map_err(|e| AppError::Internal(format!("Unexpected login response: {}", e)))?;

    let cookie = auth_cookie(&state.config, &token.access_token);
    let mut response = Json(json!({ "success": true, "user": token.user })).into_response();
    response.headers_mut().append(SET_COOKIE, header_value(&cookie)?);
    Ok(response)
}

pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    let cookie = expired_auth_cookie(&state.config);
    let mut response = Json(json!({ "success": true })).into_response();
    response.headers_mut().append(SET_COOKIE, header_value(&cookie)?);
    Ok(response)
}

/// Fail-closed: a missing cookie or any backend trouble answers `{valid:false}`.
pub async fn validate(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let invalid = || (StatusCode::UNAUTHORIZED, Json(json!({ "valid": false }))).into_response();

    let Some(token) = cookie_token(&headers, &state.config.cookie_name) else {
        return invalid();
    };

    match state
        .backend
        .send(BackendRequest::get("/auth/validate").bearer(token))
        .await
    {
        Ok(reply) if reply.status.is_success() => Json(json!({ "valid": true })).into_response(),
        Ok(reply) => {
            info!("token rejected by backend: {}", reply.status);
            invalid()
        }
        Err(e) => {
            warn!("token validation failed: {}", e);
            invalid()
        }
    }
}

/// Body goes through untouched; the backend decides the role.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let reply = state
        .backend
        .send(BackendRequest::post("/auth/signup").body(body))
        .await?;
    relay(reply)
}

pub async fn me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    let reply = state
        .backend
        .send(BackendRequest::get("/users/me").bearer(token))
        .await?;
    relay(reply)
}
