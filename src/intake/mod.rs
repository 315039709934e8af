//! Intake interview, a scripted conversation driven by message count.
//!
//! The transcript opens with a seeded greeting. Each user message gets one
//! of three fixed replies depending on how many messages have been
//! exchanged; the ninth message completes the intake.

pub mod engine;
pub mod phase;
pub mod script;

pub use engine::{DialogueTurn, advance_dialogue, advance_dialogue_with, phase_of_transcript};
pub use phase::{CHALLENGE_THRESHOLD, COMPLETE_THRESHOLD, IntakePhase};
pub use script::{GREETING, ScriptedAnswerGenerator, scripted_reply};
