//! Per-session state value and the chat transcript it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::progress::{Progress, Screen};
use crate::error::GateError;
use crate::intake::{self, IntakePhase};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single message in the intake transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Outcome of one intake exchange, without the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntakeReply {
    pub reply: String,
    pub phase: IntakePhase,
    /// True only on the exchange that finished the intake.
    pub intake_just_completed: bool,
}

/// Everything known about one session.
///
/// Handlers take the value, call one of the consuming methods, and store
/// what comes back. `intake_complete` is only ever set by
/// [`SessionState::advance_intake_with`], so it always implies a transcript
/// of at least nine messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    progress: Progress,
    messages: Vec<ChatMessage>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Current intake phase, derived from the transcript.
    pub fn intake_phase(&self) -> IntakePhase {
        intake::phase_of_transcript(&self.messages)
    }

    #[must_use]
    pub fn authenticate(mut self) -> Self {
        self.progress = self.progress.authenticate();
        self
    }

    #[must_use]
    pub fn mark_profile_complete(mut self) -> Self {
        self.progress = self.progress.mark_profile_complete();
        self
    }

    #[must_use]
    pub fn mark_resume_uploaded(mut self) -> Self {
        self.progress = self.progress.mark_resume_uploaded();
        self
    }

    /// Enter the intake screen, seeding the greeting on first visit.
    pub fn open_intake(mut self) -> Result<Self, GateError> {
        self.progress.navigate(Screen::AiIntake)?;
        if self.messages.is_empty() {
            self.messages.push(ChatMessage::assistant(intake::GREETING));
        }
        Ok(self)
    }

    /// Run one scripted intake exchange.
    pub fn advance_intake(
        self,
        user_message: impl Into<String>,
    ) -> Result<(Self, IntakeReply), GateError> {
        self.advance_intake_with(user_message, intake::scripted_reply)
    }

    /// Run one intake exchange with a custom reply source.
    ///
    /// The phase and the completion latch still follow the message count;
    /// `generate` only supplies the assistant's wording.
    pub fn advance_intake_with<F>(
        self,
        user_message: impl Into<String>,
        generate: F,
    ) -> Result<(Self, IntakeReply), GateError>
    where
        F: FnOnce(&[ChatMessage]) -> String,
    {
        let mut state = self.open_intake()?;
        let was_complete = state.progress.intake_complete();

        let turn = intake::advance_dialogue_with(
            std::mem::take(&mut state.messages),
            user_message,
            generate,
        );
        state.messages = turn.history;

        let just_completed = turn.phase.is_terminal() && !was_complete;
        if just_completed {
            state.progress = state.progress.mark_intake_complete();
            info!(
                messages = state.messages.len(),
                "Intake interview complete"
            );
        }

        Ok((
            state,
            IntakeReply {
                reply: turn.reply,
                phase: turn.phase,
                intake_just_completed: just_completed,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_for_intake() -> SessionState {
        SessionState::new()
            .authenticate()
            .mark_profile_complete()
            .mark_resume_uploaded()
    }

    #[test]
    fn open_intake_requires_resume() {
        let state = SessionState::new().authenticate().mark_profile_complete();
        let err = state.open_intake().unwrap_err();
        assert!(matches!(
            err,
            GateError::PrerequisiteNotMet {
                screen: Screen::AiIntake,
                ..
            }
        ));
    }

    #[test]
    fn open_intake_seeds_greeting_once() {
        let state = ready_for_intake().open_intake().unwrap();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].role, Role::Assistant);
        assert_eq!(state.messages()[0].content, intake::GREETING);

        let state = state.open_intake().unwrap();
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.intake_phase(), IntakePhase::Greeting);
    }

    #[test]
    fn advance_intake_is_gated() {
        let state = SessionState::new().authenticate();
        assert!(state.advance_intake("hello").is_err());
    }

    #[test]
    fn intake_latch_sets_once() {
        let mut state = ready_for_intake();
        let mut completions = 0;

        for turn in 1..=9 {
            let (next, reply) = state.advance_intake(format!("answer {turn}")).unwrap();
            state = next;
            if reply.intake_just_completed {
                completions += 1;
                assert_eq!(turn, 5, "the fifth user turn crosses the nine-message threshold");
            }
            assert_eq!(
                state.progress().intake_complete(),
                turn >= 5,
                "latch after turn {turn}"
            );
        }

        assert_eq!(completions, 1);
        assert_eq!(state.messages().len(), 19);
        assert_eq!(state.progress().completion_percent(), 100);
        assert!(state.progress().can_access_practice_interview());
    }

    #[test]
    fn empty_messages_count_towards_completion() {
        let mut state = ready_for_intake();
        for _ in 0..5 {
            state = state.advance_intake("").unwrap().0;
        }
        assert!(state.progress().intake_complete());
    }

    #[test]
    fn custom_reply_source_keeps_count_driven_phases() {
        let state = ready_for_intake();
        let (state, reply) = state
            .advance_intake_with("I build APIs", |history| {
                format!("seen {} messages", history.len())
            })
            .unwrap();
        assert_eq!(reply.reply, "seen 2 messages");
        assert_eq!(reply.phase, IntakePhase::AskedTools);
        assert_eq!(state.messages().last().unwrap().content, "seen 2 messages");
    }

    #[test]
    fn state_serde_roundtrip() {
        let state = ready_for_intake().advance_intake("hi").unwrap().0;
        let json = serde_json::to_string(&state).unwrap();
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.progress(), state.progress());
        assert_eq!(parsed.messages(), state.messages());
    }
}
