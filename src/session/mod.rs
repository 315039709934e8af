//! Per-session state: progress flags and the intake transcript.

pub mod progress;
pub mod registry;
pub mod state;

pub use progress::{INTAKE_WEIGHT, PROFILE_WEIGHT, Progress, RESUME_WEIGHT, Screen};
pub use registry::{EXPIRY_SWEEP_INTERVAL, SessionRegistry, SessionSlot, spawn_expiry_task};
pub use state::{ChatMessage, IntakeReply, Role, SessionState};
