//! Dialogue engine. Appends one user/assistant exchange to a transcript.

use tracing::{debug, warn};

use super::phase::IntakePhase;
use super::script::scripted_reply;
use crate::session::{ChatMessage, Role};

/// The result of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueTurn {
    /// The transcript with the user turn and the assistant turn appended.
    pub history: Vec<ChatMessage>,
    pub reply: String,
    /// Phase selected by the message count after the user turn.
    pub phase: IntakePhase,
    /// True when this exchange crossed the completion threshold.
    pub intake_just_completed: bool,
}

/// Phase of the exchange that produced the transcript's last user turn.
///
/// A transcript with no user turn (empty, or just the greeting) is in
/// [`IntakePhase::Greeting`].
pub fn phase_of_transcript(history: &[ChatMessage]) -> IntakePhase {
    history
        .iter()
        .rposition(|m| m.role == Role::User)
        .map(|i| IntakePhase::for_message_count(i + 1))
        .unwrap_or_default()
}

/// Run one scripted exchange.
pub fn advance_dialogue(
    history: Vec<ChatMessage>,
    user_message: impl Into<String>,
) -> DialogueTurn {
    advance_dialogue_with(history, user_message, scripted_reply)
}

/// Run one exchange, taking the assistant's wording from `generate`.
///
/// `history` is expected to start with the seeded greeting. Any user input is
/// accepted, including the empty string, and counts towards the thresholds.
pub fn advance_dialogue_with<F>(
    mut history: Vec<ChatMessage>,
    user_message: impl Into<String>,
    generate: F,
) -> DialogueTurn
where
    F: FnOnce(&[ChatMessage]) -> String,
{
    let previous = phase_of_transcript(&history);

    let user_message = user_message.into();
    if user_message.is_empty() {
        debug!("Empty intake message accepted");
    }
    history.push(ChatMessage::user(user_message));

    let phase = IntakePhase::for_message_count(history.len());
    if !previous.can_transition_to(phase) {
        warn!(from = %previous, to = %phase, "Unexpected intake phase jump");
    }

    let reply = generate(&history);
    history.push(ChatMessage::assistant(reply.clone()));

    debug!(messages = history.len(), phase = %phase, "Intake exchange recorded");

    DialogueTurn {
        history,
        reply,
        phase,
        intake_just_completed: phase.is_terminal() && !previous.is_terminal(),
    }
}
