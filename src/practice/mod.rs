//! Practice interview: fixed questions per category and canned feedback.

pub mod feedback;
pub mod questions;

pub use feedback::{
    ACCEPTED_MESSAGE, AnswerAccepted, CannedFeedback, Feedback, submit_answer, validate_answer,
};
pub use questions::{
    FALLBACK_CATEGORY, QuestionCategory, resolve_category, select_question,
    select_question_by_label,
};
