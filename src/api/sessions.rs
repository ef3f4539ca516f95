use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::extract::BearerToken;
use crate::api::forward;
use crate::backend::dto::{CreateInstanceRequest, EnrollClientRequest};
use crate::backend::BackendRequest;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EnrollByCodeParams {
    code: Option<String>,
    session_code: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct AttachQuestionnaire {
    #[serde(default)]
    title: String,
    #[serde(default)]
    is_active: bool,
}

pub async fn list_sessions(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::get("/sessions/").bearer(token)).await
}

pub async fn create_session(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::post("/sessions/").bearer(token).body(body)).await
}

pub async fn get_session(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}", session_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn update_session(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}", session_id);
    forward(&state, BackendRequest::new(Method::PUT, path).bearer(token).body(body)).await
}

pub async fn delete_session(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}", session_id);
    forward(&state, BackendRequest::new(Method::DELETE, path).bearer(token)).await
}

/// Rotates the enrollment code; the previous code stops working.
pub async fn generate_code(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}/generate-code", session_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}

pub async fn enroll_by_code(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Query(params): Query<EnrollByCodeParams>,
) -> Result<Response, AppError> {
    let code = params
        .code
        .or(params.session_code)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("Session code is required".to_string()))?;

    let request = BackendRequest::post("/sessions/enroll-by-code")
        .bearer(token)
        .query("session_code", code);
    forward(&state, request).await
}

pub async fn enroll_public(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}/enroll", session_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}

pub async fn list_enrollments(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}/enrollments", session_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn create_enrollment(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}/enrollments", session_id);
    forward(&state, BackendRequest::post(path).bearer(token).body(body)).await
}

pub async fn enroll_client(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((session_id, client_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/{}/enrollments", session_id);
    let request = BackendRequest::post(path)
        .bearer(token)
        .json(&EnrollClientRequest::active(session_id, client_id))?;
    forward(&state, request).await
}

pub async fn client_enrollments(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(client_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/client/{}/enrollments", client_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn list_instances(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(session_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/instances/{}", session_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn attach_questionnaire(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((session_id, questionnaire_id)): Path<(i64, i64)>,
    body: Option<Json<AttachQuestionnaire>>,
) -> Result<Response, AppError> {
    let attach = body.map(|Json(attach)| attach).unwrap_or_default();
    let title = attach.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    let request = CreateInstanceRequest {
        title: title.to_string(),
        questionnaire_id,
        session_id,
        is_active: attach.is_active,
    };
    let request = BackendRequest::post("/sessions/instances").bearer(token).json(&request)?;
    forward(&state, request).await
}
