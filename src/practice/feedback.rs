//! Answer submission and the canned feedback block.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::backends::FeedbackGenerator;
use crate::error::{BackendError, Error, SubmissionError};

/// Confirmation shown when an answer is accepted.
pub const ACCEPTED_MESSAGE: &str = "Answer submitted! Feedback coming soon.";

const CANNED_HEADLINE: &str = "Good start! Some suggestions:";

const CANNED_SUGGESTIONS: [&str; 3] = [
    "Try using the STAR format more explicitly",
    "Quantify your impact with specific metrics",
    "Keep your answer more concise (aim for 2-3 minutes spoken)",
];

/// Feedback on one practice answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub headline: String,
    pub suggestions: Vec<String>,
}

impl Feedback {
    /// The fixed, non-personalized feedback.
    pub fn canned() -> Self {
        Self {
            headline: CANNED_HEADLINE.to_string(),
            suggestions: CANNED_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render as a headline followed by a markdown bullet list.
    pub fn render(&self) -> String {
        let mut lines = vec![self.headline.clone()];
        lines.extend(self.suggestions.iter().map(|s| format!("- {s}")));
        lines.join("\n")
    }
}

/// An accepted practice answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerAccepted {
    pub message: &'static str,
    pub feedback: Feedback,
}

/// Reject empty answers.
///
/// Only the empty string is refused; whitespace counts as an answer.
pub fn validate_answer(answer: &str) -> Result<(), SubmissionError> {
    if answer.is_empty() {
        return Err(SubmissionError::EmptyAnswer);
    }
    Ok(())
}

/// Submit an answer to `question` and collect feedback from `generator`.
///
/// Empty answers are refused before the generator is consulted.
pub async fn submit_answer(
    generator: &dyn FeedbackGenerator,
    question: &str,
    answer: &str,
) -> Result<AnswerAccepted, Error> {
    validate_answer(answer)?;
    let feedback = generator.feedback(question, answer).await?;
    Ok(AnswerAccepted {
        message: ACCEPTED_MESSAGE,
        feedback,
    })
}

/// Feedback generator that ignores the answer and returns the canned block.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedFeedback;

#[async_trait]
impl FeedbackGenerator for CannedFeedback {
    fn name(&self) -> &str {
        "canned"
    }

    async fn feedback(&self, _question: &str, _answer: &str) -> Result<Feedback, BackendError> {
        Ok(Feedback::canned())
    }
}
