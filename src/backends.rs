//! Pluggable backend seams for everything the session hands off to an
//! external service.
//!
//! Each trait ships with a trivial implementation that always succeeds, so
//! the session core runs without any external service. Real backends slot in
//! through [`Backends`] without touching the state machines.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::error::BackendError;
use crate::intake::ScriptedAnswerGenerator;
use crate::practice::{CannedFeedback, Feedback};
use crate::profile::ProfileDraft;
use crate::session::ChatMessage;

/// Login credentials as submitted by the user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Verifies login credentials.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(false)` means the credentials were checked and refused.
    async fn verify(&self, credentials: &Credentials) -> Result<bool, BackendError>;
}

/// Receives uploaded resume files.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(false)` means the store declined the document.
    async fn store_resume(&self, bytes: &[u8], filename: &str) -> Result<bool, BackendError>;
}

/// Produces the assistant's next intake message.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// `history` ends with the user's latest turn.
    async fn generate_reply(&self, history: &[ChatMessage]) -> Result<String, BackendError>;
}

/// Produces feedback for a practice answer.
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn feedback(&self, question: &str, answer: &str) -> Result<Feedback, BackendError>;
}

/// Receives submitted profile drafts.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    fn name(&self) -> &str;

    async fn save_profile(&self, profile: &ProfileDraft) -> Result<(), BackendError>;
}

// ── Stub implementations ────────────────────────────────────────────────

/// Accepts any credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllVerifier;

#[async_trait]
impl CredentialVerifier for AcceptAllVerifier {
    fn name(&self) -> &str {
        "accept_all"
    }

    async fn verify(&self, credentials: &Credentials) -> Result<bool, BackendError> {
        debug!(email = %credentials.email, "Accepting credentials without verification");
        Ok(true)
    }
}

/// Accepts every document and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingDocumentStore;

#[async_trait]
impl DocumentStore for DiscardingDocumentStore {
    fn name(&self) -> &str {
        "discard"
    }

    async fn store_resume(&self, bytes: &[u8], filename: &str) -> Result<bool, BackendError> {
        info!(filename, size = bytes.len(), "Resume accepted and discarded");
        Ok(true)
    }
}

/// Accepts every profile and keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardingProfileStore;

#[async_trait]
impl ProfileStore for DiscardingProfileStore {
    fn name(&self) -> &str {
        "discard"
    }

    async fn save_profile(&self, profile: &ProfileDraft) -> Result<(), BackendError> {
        info!(
            industries = profile.industries.len(),
            badges = profile.badge_count(),
            "Profile accepted and discarded"
        );
        Ok(())
    }
}

/// The set of backends a [`SessionService`](crate::service::SessionService)
/// talks to.
#[derive(Clone)]
pub struct Backends {
    pub credentials: Arc<dyn CredentialVerifier>,
    pub documents: Arc<dyn DocumentStore>,
    pub answers: Arc<dyn AnswerGenerator>,
    pub feedback: Arc<dyn FeedbackGenerator>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl Backends {
    /// All-stub backends: accept everything, script every reply.
    pub fn stubbed() -> Self {
        Self {
            credentials: Arc::new(AcceptAllVerifier),
            documents: Arc::new(DiscardingDocumentStore),
            answers: Arc::new(ScriptedAnswerGenerator),
            feedback: Arc::new(CannedFeedback),
            profiles: Arc::new(DiscardingProfileStore),
        }
    }
}

impl Default for Backends {
    fn default() -> Self {
        Self::stubbed()
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("credentials", &self.credentials.name())
            .field("documents", &self.documents.name())
            .field("answers", &self.answers.name())
            .field("feedback", &self.feedback.name())
            .field("profiles", &self.profiles.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[tokio::test]
    async fn stubs_always_succeed() {
        let backends = Backends::stubbed();

        let creds = Credentials::new("ada@example.com", "hunter2");
        assert!(backends.credentials.verify(&creds).await.unwrap());

        assert!(
            backends
                .documents
                .store_resume(b"%PDF-1.7", "cv.pdf")
                .await
                .unwrap()
        );

        backends
            .profiles
            .save_profile(&ProfileDraft::default())
            .await
            .unwrap();
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("ada@example.com", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("ada@example.com"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(creds.password.expose_secret(), "hunter2");
    }

    #[test]
    fn debug_lists_backend_names() {
        let debug = format!("{:?}", Backends::default());
        assert!(debug.contains("accept_all"));
        assert!(debug.contains("scripted"));
    }
}
