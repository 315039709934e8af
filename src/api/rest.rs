//! REST handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use crate::backends::Credentials;
use crate::error::{Error, SessionError};
use crate::profile::{ProfileDraft, ProfileOptions};
use crate::session::Screen;

/// Parse a session id from a path segment.
pub(crate) fn session_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| SessionError::InvalidId(raw.to_string()).into())
}

// ── Health / catalogue ──────────────────────────────────────────────────

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "interview-prep"
    }))
}

pub async fn profile_options() -> impl IntoResponse {
    Json(ProfileOptions::catalogue())
}

// ── Sessions ────────────────────────────────────────────────────────────

pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let id = state.service.create_session().await;
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "session_id": id })),
    )
}

pub async fn session_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let status = state.service.status(session_id(&id)?).await?;
    Ok(Json(status))
}

pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    state.service.end_session(session_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    let credentials = Credentials::new(body.email, body.password);
    let status = state
        .service
        .authenticate(session_id(&id)?, credentials)
        .await?;
    Ok(Json(status))
}

pub async fn navigate(
    State(state): State<AppState>,
    path: Result<Path<(String, Screen)>, PathRejection>,
) -> Result<impl IntoResponse, Error> {
    let Path((id, screen)) = path?;
    let screen = state.service.navigate(session_id(&id)?, screen).await?;
    Ok(Json(serde_json::json!({
        "screen": screen,
        "title": screen.title(),
    })))
}

// ── Profile / resume ────────────────────────────────────────────────────

pub async fn save_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    draft: Result<Json<ProfileDraft>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(draft) = draft?;
    let status = state.service.save_profile(session_id(&id)?, draft).await?;
    Ok(Json(serde_json::json!({
        "message": "Profile saved successfully!",
        "status": status,
    })))
}

#[derive(Deserialize)]
pub struct ResumeQuery {
    filename: String,
}

pub async fn upload_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<ResumeQuery>, QueryRejection>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let Query(query) = query?;
    let status = state
        .service
        .upload_resume(session_id(&id)?, &body, &query.filename)
        .await?;
    Ok(Json(serde_json::json!({
        "message": "Resume uploaded successfully!",
        "status": status,
    })))
}

// ── Intake ──────────────────────────────────────────────────────────────

/// Enter the intake screen. The first call on a session seeds the
/// assistant's greeting into the transcript.
pub async fn open_intake(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    let messages = state.service.open_intake(session_id(&id)?).await?;
    Ok(Json(serde_json::json!({ "messages": messages })))
}

#[derive(Deserialize)]
pub struct IntakeMessageRequest {
    #[serde(default)]
    content: String,
}

pub async fn send_intake_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<IntakeMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    let exchange = state
        .service
        .send_intake_message(session_id(&id)?, body.content)
        .await?;
    Ok(Json(exchange))
}

// ── Practice interview ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct QuestionQuery {
    #[serde(default)]
    category: String,
}

pub async fn practice_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<QuestionQuery>, QueryRejection>,
) -> Result<impl IntoResponse, Error> {
    let Query(query) = query?;
    let question = state
        .service
        .practice_question(session_id(&id)?, &query.category)
        .await?;
    Ok(Json(question))
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    category: String,
    #[serde(default)]
    answer: String,
}

pub async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(body) = body?;
    let accepted = state
        .service
        .submit_answer(session_id(&id)?, &body.category, &body.answer)
        .await?;
    Ok(Json(serde_json::json!({
        "message": accepted.message,
        "feedback": accepted.feedback,
        "feedback_text": accepted.feedback.render(),
    })))
}
