//! `SessionService` runs user interactions against one session at a time.
//!
//! Each call locks the session's slot, clones the current [`SessionState`],
//! consults the backends, and writes back the value returned by the pure
//! state methods. A failed interaction leaves the stored state untouched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::backends::{Backends, Credentials};
use crate::error::{Error, ResumeError, Result, SessionError};
use crate::intake::IntakePhase;
use crate::practice::{self, AnswerAccepted, QuestionCategory};
use crate::profile::ProfileDraft;
use crate::resume::ResumeFormat;
use crate::session::{ChatMessage, IntakeReply, Screen, SessionRegistry, SessionState};

/// Progress snapshot returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub session_id: Uuid,
    pub authenticated: bool,
    pub profile_complete: bool,
    pub resume_uploaded: bool,
    pub intake_complete: bool,
    pub completion_percent: u8,
    pub reachable_screens: Vec<Screen>,
    pub intake_phase: IntakePhase,
    pub message_count: usize,
}

impl SessionStatus {
    fn of(session_id: Uuid, state: &SessionState) -> Self {
        let progress = state.progress();
        Self {
            session_id,
            authenticated: progress.is_authenticated(),
            profile_complete: progress.profile_complete(),
            resume_uploaded: progress.resume_uploaded(),
            intake_complete: progress.intake_complete(),
            completion_percent: progress.completion_percent(),
            reachable_screens: progress.reachable_screens(),
            intake_phase: state.intake_phase(),
            message_count: state.messages().len(),
        }
    }
}

/// One intake exchange as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeExchange {
    #[serde(flatten)]
    pub reply: IntakeReply,
    pub completion_percent: u8,
    pub message_count: usize,
}

/// A practice question ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeQuestion {
    pub category: QuestionCategory,
    pub label: &'static str,
    pub question: &'static str,
}

impl From<QuestionCategory> for PracticeQuestion {
    fn from(category: QuestionCategory) -> Self {
        Self {
            category,
            label: category.label(),
            question: practice::select_question(category),
        }
    }
}

/// Coordinates sessions and backends.
pub struct SessionService {
    sessions: Arc<SessionRegistry>,
    backends: Backends,
}

impl SessionService {
    pub fn new(backends: Backends) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            backends,
        }
    }

    /// Service with every backend stubbed.
    pub fn stubbed() -> Self {
        Self::new(Backends::stubbed())
    }

    pub fn sessions(&self) -> &Arc<SessionRegistry> {
        &self.sessions
    }

    pub async fn create_session(&self) -> Uuid {
        self.sessions.create().await
    }

    pub async fn end_session(&self, id: Uuid) -> Result<()> {
        if self.sessions.remove(id).await {
            Ok(())
        } else {
            Err(SessionError::NotFound { id }.into())
        }
    }

    pub async fn status(&self, id: Uuid) -> Result<SessionStatus> {
        let state = self.sessions.snapshot(id).await?;
        Ok(SessionStatus::of(id, &state))
    }

    /// Check whether `screen` may be entered right now.
    pub async fn navigate(&self, id: Uuid, screen: Screen) -> Result<Screen> {
        let state = self.sessions.snapshot(id).await?;
        state.progress().navigate(screen).map_err(|e| {
            warn!(session_id = %id, screen = %screen, reason = %e, "Navigation blocked");
            Error::from(e)
        })
    }

    pub async fn authenticate(&self, id: Uuid, credentials: Credentials) -> Result<SessionStatus> {
        let slot = self.sessions.slot(id).await?;
        let mut current = slot.lock().await;

        if !self.backends.credentials.verify(&credentials).await? {
            warn!(session_id = %id, email = %credentials.email, "Login refused");
            return Err(SessionError::CredentialsRejected {
                email: credentials.email,
            }
            .into());
        }

        *current = current.clone().authenticate();
        info!(session_id = %id, email = %credentials.email, "Session authenticated");
        Ok(SessionStatus::of(id, &current))
    }

    pub async fn save_profile(&self, id: Uuid, draft: ProfileDraft) -> Result<SessionStatus> {
        let slot = self.sessions.slot(id).await?;
        let mut current = slot.lock().await;

        current.progress().navigate(Screen::ProfileSetup)?;
        draft.validate()?;
        self.backends.profiles.save_profile(&draft).await?;

        *current = current.clone().mark_profile_complete();
        info!(session_id = %id, "Profile saved");
        Ok(SessionStatus::of(id, &current))
    }

    pub async fn upload_resume(
        &self,
        id: Uuid,
        bytes: &[u8],
        filename: &str,
    ) -> Result<SessionStatus> {
        let slot = self.sessions.slot(id).await?;
        let mut current = slot.lock().await;

        current.progress().navigate(Screen::ResumeUpload)?;
        let format = ResumeFormat::from_filename(filename)?;
        if !self.backends.documents.store_resume(bytes, filename).await? {
            return Err(ResumeError::Rejected {
                filename: filename.to_string(),
            }
            .into());
        }

        *current = current.clone().mark_resume_uploaded();
        info!(session_id = %id, filename, ?format, size = bytes.len(), "Resume uploaded");
        Ok(SessionStatus::of(id, &current))
    }

    /// Enter the intake screen and return the transcript so far.
    pub async fn open_intake(&self, id: Uuid) -> Result<Vec<ChatMessage>> {
        let slot = self.sessions.slot(id).await?;
        let mut current = slot.lock().await;

        *current = current.clone().open_intake()?;
        Ok(current.messages().to_vec())
    }

    /// Record the user's message and the assistant's reply.
    pub async fn send_intake_message(
        &self,
        id: Uuid,
        content: impl Into<String>,
    ) -> Result<IntakeExchange> {
        let content = content.into();
        let slot = self.sessions.slot(id).await?;
        let mut current = slot.lock().await;

        let state = current.clone().open_intake()?;

        let mut pending = state.messages().to_vec();
        pending.push(ChatMessage::user(content.clone()));
        let generated = self.backends.answers.generate_reply(&pending).await?;

        let (next, reply) = state.advance_intake_with(content, |_| generated)?;
        *current = next;

        info!(
            session_id = %id,
            phase = %reply.phase,
            messages = current.messages().len(),
            "Intake message handled"
        );
        Ok(IntakeExchange {
            reply,
            completion_percent: current.progress().completion_percent(),
            message_count: current.messages().len(),
        })
    }

    /// Look up the practice question for a category label.
    pub async fn practice_question(&self, id: Uuid, label: &str) -> Result<PracticeQuestion> {
        self.navigate(id, Screen::PracticeInterview).await?;
        Ok(practice::resolve_category(label).into())
    }

    /// Submit an answer to the question for `label` and get feedback.
    pub async fn submit_answer(
        &self,
        id: Uuid,
        label: &str,
        answer: &str,
    ) -> Result<AnswerAccepted> {
        self.navigate(id, Screen::PracticeInterview).await?;

        let question = practice::select_question_by_label(label);
        let accepted = practice::submit_answer(self.backends.feedback.as_ref(), question, answer)
            .await
            .inspect_err(|e| warn!(session_id = %id, error = %e, "Practice answer rejected"))?;
        info!(session_id = %id, "Practice answer accepted");
        Ok(accepted)
    }
}
