pub mod auth;
pub mod cookies;
pub mod extract;
pub mod instances;
pub mod logging;
pub mod questionnaires;
pub mod sessions;
pub mod users;

use axum::Json;
use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::http::StatusCode;
use tower::ServiceBuilder;

use crate::backend::{BackendReply, BackendRequest};
use crate::error::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/validate", get(auth::validate))
        .route("/auth/signup", post(auth::signup))
        .route("/users/me", get(auth::me).patch(users::update_me));

    let session_routes = Router::new()
        .route("/sessions", get(sessions::list_sessions).post(sessions::create_session))
        .route("/sessions/enroll-by-code", post(sessions::enroll_by_code))
        .route(
            "/sessions/{session_id}",
            get(sessions::get_session)
                .put(sessions::update_session)
                .delete(sessions::delete_session),
        )
        .route("/sessions/{session_id}/generate-code", post(sessions::generate_code))
        .route("/sessions/{session_id}/enroll", post(sessions::enroll_public))
        .route(
            "/sessions/{session_id}/enrollments",
            get(sessions::list_enrollments).post(sessions::create_enrollment),
        )
        .route("/sessions/{session_id}/clients/{client_id}", post(sessions::enroll_client))
        .route("/sessions/{session_id}/instances", get(sessions::list_instances))
        .route(
            "/sessions/{session_id}/questionnaires/{questionnaire_id}",
            post(sessions::attach_questionnaire),
        )
        .route("/clients/{client_id}/enrollments", get(sessions::client_enrollments))
        .route(
            "/instances/{instance_id}",
            put(instances::update_instance).delete(instances::delete_instance),
        )
        .route("/instances/{instance_id}/activate", post(instances::activate_instance))
        .route("/instances/{instance_id}/deactivate", post(instances::deactivate_instance));

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/clients", get(users::list_clients))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        );

    let questionnaire_routes = Router::new()
        .route(
            "/questionnaires",
            get(questionnaires::list_questionnaires).post(questionnaires::create_questionnaire),
        )
        .route("/questionnaires/client", get(questionnaires::client_questionnaires))
        .route(
            "/questionnaires/{questionnaire_id}",
            get(questionnaires::get_questionnaire).patch(questionnaires::update_questionnaire),
        )
        .route(
            "/questionnaires/{questionnaire_id}/attachment",
            get(questionnaires::questionnaire_attachment),
        )
        .route(
            "/questionnaires/{questionnaire_id}/questions",
            post(questionnaires::add_question),
        )
        .route(
            "/questionnaires/{questionnaire_id}/questions/{question_id}",
            patch(questionnaires::update_question).delete(questionnaires::delete_question),
        )
        .route("/questionnaires/{questionnaire_id}/start", post(questionnaires::start_response))
        .route(
            "/questionnaires/{questionnaire_id}/responses/{response_id}/questions/{question_id}",
            post(questionnaires::submit_answer),
        )
        .route(
            "/questionnaires/{questionnaire_id}/responses/{response_id}/complete",
            post(questionnaires::complete_response),
        )
        .route("/responses/{response_id}/results", get(questionnaires::response_results))
        .route("/results/{result_id}", get(questionnaires::result_detail));

    let api = Router::new()
        .route("/health", get(health))
        .merge(auth_routes)
        .merge(session_routes)
        .merge(user_routes)
        .merge(questionnaire_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(middleware::from_fn(logging::log_requests)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Sends one request upstream and relays whatever comes back.
pub(crate) async fn forward(state: &AppState, request: BackendRequest) -> Result<Response, AppError> {
    let reply = state.backend.send(request).await?;
    relay(reply)
}

pub(crate) fn relay(reply: BackendReply) -> Result<Response, AppError> {
    let status = reply.status;
    let body = reply.into_result()?;
    if body.is_null() {
        return Ok(status.into_response());
    }
    Ok((status, Json(body)).into_response())
}
