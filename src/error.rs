//! Error types for Interview Prep.

use uuid::Uuid;

use crate::session::Screen;

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("{0}")]
    Gate(#[from] GateError),

    #[error("{0}")]
    Submission(#[from] SubmissionError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Resume error: {0}")]
    Resume(#[from] ResumeError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Session lookup and login errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session {id} not found")]
    NotFound { id: Uuid },

    #[error("Invalid session ID: {0}")]
    InvalidId(String),

    #[error("Credentials rejected for {email}")]
    CredentialsRejected { email: String },
}

/// Navigation blocked by a progress gate.
///
/// Never fatal: the caller shows the message as a warning and the session
/// stays where it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Please log in first!")]
    LoginRequired,

    #[error("{warning}")]
    PrerequisiteNotMet {
        screen: Screen,
        warning: &'static str,
    },
}

/// Practice answer submission errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please provide an answer before submitting.")]
    EmptyAnswer,
}

/// Profile draft validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Salary range is inverted: min {min}K > max {max}K")]
    SalaryRangeInverted { min: u32, max: u32 },

    #[error("Salary {value}K is outside {floor}K..={ceiling}K")]
    SalaryOutOfBounds { value: u32, floor: u32, ceiling: u32 },

    #[error("Unknown {kind} badge: {label}")]
    UnknownBadge { kind: String, label: String },
}

/// Resume upload errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResumeError {
    #[error("Unsupported resume file {filename}: expected a PDF or DOCX file")]
    UnsupportedType { filename: String },

    #[error("Resume {filename} was not accepted by the document store")]
    Rejected { filename: String },
}

/// Failures at the pluggable backend seams (auth, storage, generation).
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend {backend} unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    #[error("Backend {backend} rejected the request: {reason}")]
    Rejected { backend: String, reason: String },
}

/// A request the HTTP layer could not decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("malformed path: {0}")]
    Path(String),

    #[error("malformed query: {0}")]
    Query(String),

    #[error("malformed body: {0}")]
    Body(String),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
