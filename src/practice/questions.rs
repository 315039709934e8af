//! Practice question table.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Kind of practice interview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Behavioral,
    Technical,
    StarMethod,
    Situational,
}

impl QuestionCategory {
    /// All categories, in menu order.
    pub const ALL: [QuestionCategory; 4] = [
        QuestionCategory::Behavioral,
        QuestionCategory::Technical,
        QuestionCategory::StarMethod,
        QuestionCategory::Situational,
    ];

    /// Label shown in the category picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Behavioral => "Behavioral",
            Self::Technical => "Technical",
            Self::StarMethod => "STAR Method",
            Self::Situational => "Situational",
        }
    }

    /// Parse a picker label or its snake_case form, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|category| {
            category.label().eq_ignore_ascii_case(label)
                || category.to_string().eq_ignore_ascii_case(label)
        })
    }

    /// The fixed question for this category.
    pub fn question(&self) -> &'static str {
        match self {
            Self::Behavioral => {
                "Tell me about a time you had to deal with a difficult team member."
            }
            Self::Technical => {
                "Explain how you would approach implementing a database schema for this application."
            }
            Self::StarMethod => {
                "Describe a situation where you had to meet a tight deadline. \
                 What was your task, what actions did you take, and what was the result?"
            }
            Self::Situational => {
                "How would you handle a situation where your manager asks you to do something you disagree with?"
            }
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Behavioral => "behavioral",
            Self::Technical => "technical",
            Self::StarMethod => "star_method",
            Self::Situational => "situational",
        };
        write!(f, "{s}")
    }
}

/// Category used when a label matches nothing.
pub const FALLBACK_CATEGORY: QuestionCategory = QuestionCategory::Situational;

/// The question for `category`.
pub fn select_question(category: QuestionCategory) -> &'static str {
    category.question()
}

/// Resolve a free-form label to a category, falling back to
/// [`FALLBACK_CATEGORY`] for anything unrecognised.
pub fn resolve_category(label: &str) -> QuestionCategory {
    QuestionCategory::from_label(label).unwrap_or_else(|| {
        debug!(label, fallback = %FALLBACK_CATEGORY, "Unknown question category");
        FALLBACK_CATEGORY
    })
}

/// The question for a free-form category label.
pub fn select_question_by_label(label: &str) -> &'static str {
    select_question(resolve_category(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_distinct_questions() {
        let questions: std::collections::HashSet<_> =
            QuestionCategory::ALL.iter().map(|c| select_question(*c)).collect();
        assert_eq!(questions.len(), 4);
    }

    #[test]
    fn known_questions() {
        assert_eq!(
            select_question(QuestionCategory::Behavioral),
            "Tell me about a time you had to deal with a difficult team member."
        );
        assert!(select_question(QuestionCategory::Technical).contains("database schema"));
        assert_eq!(
            select_question(QuestionCategory::StarMethod),
            "Describe a situation where you had to meet a tight deadline. What was your task, \
             what actions did you take, and what was the result?"
        );
        assert!(select_question(QuestionCategory::Situational).contains("disagree with"));
    }

    #[test]
    fn labels_parse_both_forms() {
        assert_eq!(
            QuestionCategory::from_label("STAR Method"),
            Some(QuestionCategory::StarMethod)
        );
        assert_eq!(
            QuestionCategory::from_label("star_method"),
            Some(QuestionCategory::StarMethod)
        );
        assert_eq!(
            QuestionCategory::from_label(" behavioral "),
            Some(QuestionCategory::Behavioral)
        );
        assert_eq!(QuestionCategory::from_label("Trivia"), None);
    }

    #[test]
    fn unknown_label_falls_back_to_situational() {
        assert_eq!(
            select_question_by_label("Trivia"),
            select_question(QuestionCategory::Situational)
        );
        assert_eq!(select_question_by_label(""), select_question_by_label("nonsense"));
        assert_eq!(
            select_question_by_label("Technical"),
            select_question(QuestionCategory::Technical)
        );
    }

    #[test]
    fn display_matches_serde() {
        for category in QuestionCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(format!("\"{category}\""), json);
        }
    }
}
