//! The canned intake script and the answer generator built on it.

use async_trait::async_trait;

use super::phase::IntakePhase;
use crate::backends::AnswerGenerator;
use crate::error::BackendError;
use crate::session::ChatMessage;

/// Seeded assistant message that opens every intake transcript.
pub const GREETING: &str = "Hi there! I'd like to learn more about your work experience. \
Could you tell me about your most recent role and what you did day-to-day?";

pub const ASK_TOOLS: &str = "Thanks for sharing! Next question: \
What were the main tools and technologies you used in this role?";

pub const ASK_CHALLENGE: &str = "Got it. Could you tell me about a challenging project \
you worked on and how you approached it?";

pub const INTAKE_COMPLETE: &str = "Thank you for completing the intake interview! \
We'll use this information to enhance your profile.";

impl IntakePhase {
    /// The fixed assistant line for this phase.
    pub fn scripted_line(&self) -> &'static str {
        match self {
            Self::Greeting => GREETING,
            Self::AskedTools => ASK_TOOLS,
            Self::AskedChallenge => ASK_CHALLENGE,
            Self::Complete => INTAKE_COMPLETE,
        }
    }
}

/// Scripted reply for a history that already ends with the user's turn.
pub fn scripted_reply(history: &[ChatMessage]) -> String {
    IntakePhase::for_message_count(history.len())
        .scripted_line()
        .to_string()
}

/// Answer generator that replays the canned script.
///
/// Stands in for a language-model backend; replies depend only on how many
/// messages have been exchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedAnswerGenerator;

#[async_trait]
impl AnswerGenerator for ScriptedAnswerGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_reply(&self, history: &[ChatMessage]) -> Result<String, BackendError> {
        Ok(scripted_reply(history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(len: usize) -> Vec<ChatMessage> {
        (0..len).map(|i| ChatMessage::user(format!("m{i}"))).collect()
    }

    #[test]
    fn scripted_reply_uses_three_lines() {
        assert_eq!(scripted_reply(&history_of(2)), ASK_TOOLS);
        assert_eq!(scripted_reply(&history_of(4)), ASK_TOOLS);
        assert_eq!(scripted_reply(&history_of(5)), ASK_CHALLENGE);
        assert_eq!(scripted_reply(&history_of(8)), ASK_CHALLENGE);
        assert_eq!(scripted_reply(&history_of(9)), INTAKE_COMPLETE);
        assert_eq!(scripted_reply(&history_of(30)), INTAKE_COMPLETE);
    }

    #[test]
    fn lines_match_the_script() {
        assert!(GREETING.starts_with("Hi there!"));
        assert!(GREETING.ends_with("what you did day-to-day?"));
        assert!(ASK_TOOLS.contains("main tools and technologies"));
        assert!(ASK_CHALLENGE.contains("challenging project"));
        assert!(INTAKE_COMPLETE.contains("enhance your profile"));
    }

    #[tokio::test]
    async fn generator_matches_pure_script() {
        let generator = ScriptedAnswerGenerator;
        for len in 1..12 {
            let history = history_of(len);
            let reply = generator.generate_reply(&history).await.unwrap();
            assert_eq!(reply, scripted_reply(&history));
        }
    }
}
