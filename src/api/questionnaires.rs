//! Questionnaire authoring, the client answering flow and response review.

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

pub async fn list_questionnaires(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::get("/questionnaires").bearer(token)).await
}

pub async fn create_questionnaire(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::post("/questionnaires").bearer(token).body(body)).await
}

/// Questionnaires assigned to the signed-in client through active instances.
pub async fn client_questionnaires(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, AppError> {
    forward(&state, BackendRequest::get("/questionnaires/client").bearer(token)).await
}

pub async fn get_questionnaire(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(questionnaire_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}", questionnaire_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn update_questionnaire(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(questionnaire_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}", questionnaire_id);
    forward(&state, BackendRequest::new(Method::PATCH, path).bearer(token).body(body)).await
}

pub async fn questionnaire_attachment(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(questionnaire_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/sessions/questionnaire/{}/is-attached", questionnaire_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn add_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(questionnaire_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}/questions", questionnaire_id);
    forward(&state, BackendRequest::post(path).bearer(token).body(body)).await
}

pub async fn update_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((questionnaire_id, question_id)): Path<(i64, i64)>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}/questions/{}", questionnaire_id, question_id);
    forward(&state, BackendRequest::new(Method::PATCH, path).bearer(token).body(body)).await
}

pub async fn delete_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((questionnaire_id, question_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}/questions/{}", questionnaire_id, question_id);
    forward(&state, BackendRequest::new(Method::DELETE, path).bearer(token)).await
}

/// Opens (or resumes) the caller's response to a questionnaire.
pub async fn start_response(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(questionnaire_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}/start", questionnaire_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}

pub async fn submit_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((questionnaire_id, response_id, question_id)): Path<(i64, i64, i64)>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let path = format!(
        "/questionnaires/{}/responses/{}/questions/{}",
        questionnaire_id, response_id, question_id
    );
    forward(&state, BackendRequest::post(path).bearer(token).body(body)).await
}

pub async fn complete_response(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path((questionnaire_id, response_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let path = format!("/questionnaires/{}/responses/{}/complete", questionnaire_id, response_id);
    forward(&state, BackendRequest::post(path).bearer(token)).await
}

/// Processing results attached to one completed response, for staff review.
pub async fn response_results(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(response_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/processors/results/response/{}", response_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}

pub async fn result_detail(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(result_id): Path<i64>,
) -> Result<Response, AppError> {
    let path = format!("/processors/results/{}", result_id);
    forward(&state, BackendRequest::get(path).bearer(token)).await
}
