//! Intake phase machine: which scripted question the conversation is on.

use serde::{Deserialize, Serialize};

/// Message count (after the user's latest turn) at which the script moves
/// on to the challenging-project question.
pub const CHALLENGE_THRESHOLD: usize = 5;

/// Message count (after the user's latest turn) at which the intake is done.
pub const COMPLETE_THRESHOLD: usize = 9;

/// The phases of the scripted intake interview.
///
/// Progresses linearly: Greeting → AskedTools → AskedChallenge → Complete.
/// Every phase but Greeting can repeat; Complete is absorbing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakePhase {
    #[default]
    Greeting,
    AskedTools,
    AskedChallenge,
    Complete,
}

impl IntakePhase {
    /// Phase reached once the transcript holds `count` messages, counted
    /// right after the user's latest turn was appended.
    pub fn for_message_count(count: usize) -> Self {
        match count {
            0 => Self::Greeting,
            n if n < CHALLENGE_THRESHOLD => Self::AskedTools,
            n if n < COMPLETE_THRESHOLD => Self::AskedChallenge,
            _ => Self::Complete,
        }
    }

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: IntakePhase) -> bool {
        use IntakePhase::*;
        matches!(
            (self, target),
            (Greeting, AskedTools)
                | (AskedTools, AskedTools)
                | (AskedTools, AskedChallenge)
                | (AskedChallenge, AskedChallenge)
                | (AskedChallenge, Complete)
                | (Complete, Complete)
        )
    }

    /// Whether the intake is finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(&self) -> Option<IntakePhase> {
        use IntakePhase::*;
        match self {
            Greeting => Some(AskedTools),
            AskedTools => Some(AskedChallenge),
            AskedChallenge => Some(Complete),
            Complete => None,
        }
    }
}

impl std::fmt::Display for IntakePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Greeting => "greeting",
            Self::AskedTools => "asked_tools",
            Self::AskedChallenge => "asked_challenge",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        use IntakePhase::*;
        let expected = [
            (0, Greeting),
            (1, AskedTools),
            (2, AskedTools),
            (4, AskedTools),
            (5, AskedChallenge),
            (8, AskedChallenge),
            (9, Complete),
            (10, Complete),
            (100, Complete),
        ];
        for (count, phase) in expected {
            assert_eq!(IntakePhase::for_message_count(count), phase, "count {count}");
        }
    }

    #[test]
    fn valid_transitions() {
        use IntakePhase::*;
        let transitions = [
            (Greeting, AskedTools),
            (AskedTools, AskedTools),
            (AskedTools, AskedChallenge),
            (AskedChallenge, AskedChallenge),
            (AskedChallenge, Complete),
            (Complete, Complete),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use IntakePhase::*;
        // Skip phases
        assert!(!Greeting.can_transition_to(Complete));
        assert!(!AskedTools.can_transition_to(Complete));
        // Go backward
        assert!(!AskedChallenge.can_transition_to(AskedTools));
        assert!(!Complete.can_transition_to(Greeting));
        // Greeting is only the seed
        assert!(!Greeting.can_transition_to(Greeting));
    }

    #[test]
    fn next_walks_all_phases() {
        use IntakePhase::*;
        let mut current = Greeting;
        for expected_next in [AskedTools, AskedChallenge, Complete] {
            let next = current.next().unwrap();
            assert!(current.can_transition_to(next));
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.is_terminal());
        assert!(current.next().is_none());
    }

    #[test]
    fn display_matches_serde() {
        use IntakePhase::*;
        for phase in [Greeting, AskedTools, AskedChallenge, Complete] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{phase}\""), json, "Display and serde should match for {phase:?}");
        }
    }
}
