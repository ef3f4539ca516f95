//! User directory and role management. Role rules live in the backend.

use axum::extract::{Path, State};
use axum::http::Method;
use axum::response::Response;
use axum::Json;
use serde_json::Value;

use crate::api::extract::BearerToken;
use crate::api::forward;
use crate::backend::BackendRequest;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::get("/users").bearer(token)).await
}

/// Administrators create accounts of any role here; self-signup stays client-only.
pub async fn create_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::post("/users/create").bearer(token).body(body)).await
}

pub async fn list_clients(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::get("/users/clients").bearer(token)).await
}

pub async fn update_me(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let request = BackendRequest::new(Method::PATCH, "/users/me").bearer(token).body(body);
    forward(&state, request).await
}

pub async fn get_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/users/{}", user_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn update_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/users/{}", user_id);
    forward(&state, BackendRequest::new(Method::PATCH, path).bearer(token).body(body)).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/users/{}", user_id);
    forward(&state, BackendRequest::new(Method::DELETE, path).bearer(token)).await
}
