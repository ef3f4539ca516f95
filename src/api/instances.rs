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

pub async fn update_instance(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(instance_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/instances/{}", instance_id);
    forward(&state, BackendRequest::new(Method::PUT, path).bearer(token).body(body)).await
}

pub async fn delete_instance(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(instance_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/instances/{}", instance_id);
    forward(&state, BackendRequest::new(Method::DELETE, path).bearer(token)).await
}

pub async fn activate_instance(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(instance_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/instances/{}/activate", instance_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}

pub async fn deactivate_instance(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(instance_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/instances/{}/deactivate", instance_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}
