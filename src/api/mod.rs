//! HTTP surface: REST endpoints plus the intake chat WebSocket.

pub mod chat;
pub mod rest;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::error;

use crate::error::{Error, GateError, RequestError, SessionError};
use crate::service::SessionService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SessionService>,
}

/// Build the Axum router with every session route.
pub fn api_routes(service: Arc<SessionService>) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(rest::health))
        .route("/api/profile/options", get(rest::profile_options))
        .route("/api/sessions", post(rest::create_session))
        .route(
            "/api/sessions/{id}",
            get(rest::session_status).delete(rest::end_session),
        )
        .route("/api/sessions/{id}/login", post(rest::login))
        .route("/api/sessions/{id}/status", get(rest::session_status))
        .route("/api/sessions/{id}/screens/{screen}", get(rest::navigate))
        .route("/api/sessions/{id}/profile", post(rest::save_profile))
        .route("/api/sessions/{id}/resume", post(rest::upload_resume))
        .route("/api/sessions/{id}/intake", get(rest::open_intake))
        .route("/api/sessions/{id}/intake/messages", post(rest::send_intake_message))
        .route("/api/sessions/{id}/intake/ws", get(chat::ws_handler))
        .route("/api/sessions/{id}/practice/question", get(rest::practice_question))
        .route("/api/sessions/{id}/practice/answers", post(rest::submit_answer))
        .with_state(state)
}

impl Error {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Session(SessionError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Error::Session(SessionError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            Error::Session(SessionError::CredentialsRejected { .. }) => StatusCode::UNAUTHORIZED,
            Error::Gate(GateError::LoginRequired) => StatusCode::UNAUTHORIZED,
            Error::Gate(GateError::PrerequisiteNotMet { .. }) => StatusCode::FORBIDDEN,
            Error::Submission(_) | Error::Profile(_) | Error::Resume(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Error::Request(RequestError::Body(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Request(_) => StatusCode::BAD_REQUEST,
            Error::Backend(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body: gate failures are warnings the UI shows inline, the rest
    /// are errors.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Error::Gate(GateError::PrerequisiteNotMet { screen, warning }) => serde_json::json!({
                "level": "warning",
                "screen": screen,
                "message": warning,
            }),
            Error::Gate(GateError::LoginRequired) => serde_json::json!({
                "level": "warning",
                "message": self.to_string(),
            }),
            _ => serde_json::json!({
                "level": "error",
                "error": self.to_string(),
            }),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        RequestError::Body(rejection.body_text()).into()
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        RequestError::Path(rejection.body_text()).into()
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        RequestError::Query(rejection.body_text()).into()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        (status, Json(self.to_json())).into_response()
    }
}
