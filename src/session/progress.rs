//! Session progress controller: completion flags, score and screen gates.

use serde::{Deserialize, Serialize};

use crate::error::GateError;

/// Score contributed by a saved profile.
pub const PROFILE_WEIGHT: u8 = 25;
/// Score contributed by an accepted resume.
pub const RESUME_WEIGHT: u8 = 25;
/// Score contributed by a finished intake interview.
pub const INTAKE_WEIGHT: u8 = 50;

/// The screens a logged-in user can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    ProfileSetup,
    ResumeUpload,
    AiIntake,
    PracticeInterview,
}

impl Screen {
    /// All screens, in sidebar order.
    pub const ALL: [Screen; 4] = [
        Screen::ProfileSetup,
        Screen::ResumeUpload,
        Screen::AiIntake,
        Screen::PracticeInterview,
    ];

    /// Human-readable title shown in navigation.
    pub fn title(&self) -> &'static str {
        match self {
            Self::ProfileSetup => "Profile Setup",
            Self::ResumeUpload => "Resume Upload",
            Self::AiIntake => "AI Intake",
            Self::PracticeInterview => "Practice Interview",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::ProfileSetup => "profile_setup",
            Self::ResumeUpload => "resume_upload",
            Self::AiIntake => "ai_intake",
            Self::PracticeInterview => "practice_interview",
        };
        write!(f, "{s}")
    }
}

/// Completion flags for one session.
///
/// A plain `Copy` value: every `mark_*` call consumes the old value and
/// returns the updated one. Marking is idempotent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    authenticated: bool,
    profile_complete: bool,
    resume_uploaded: bool,
    intake_complete: bool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticate(mut self) -> Self {
        self.authenticated = true;
        self
    }

    #[must_use]
    pub fn mark_profile_complete(mut self) -> Self {
        self.profile_complete = true;
        self
    }

    #[must_use]
    pub fn mark_resume_uploaded(mut self) -> Self {
        self.resume_uploaded = true;
        self
    }

    #[must_use]
    pub fn mark_intake_complete(mut self) -> Self {
        self.intake_complete = true;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn profile_complete(&self) -> bool {
        self.profile_complete
    }

    pub fn resume_uploaded(&self) -> bool {
        self.resume_uploaded
    }

    pub fn intake_complete(&self) -> bool {
        self.intake_complete
    }

    /// Flat additive score over the completed steps: one of 0, 25, 50, 75, 100.
    pub fn completion_percent(&self) -> u8 {
        let mut percent = 0;
        if self.profile_complete {
            percent += PROFILE_WEIGHT;
        }
        if self.resume_uploaded {
            percent += RESUME_WEIGHT;
        }
        if self.intake_complete {
            percent += INTAKE_WEIGHT;
        }
        percent
    }

    pub fn can_access_intake(&self) -> bool {
        self.resume_uploaded
    }

    pub fn can_access_practice_interview(&self) -> bool {
        self.intake_complete
    }

    /// Check whether `screen` may be entered.
    ///
    /// Returns the screen on success so callers can chain on it.
    pub fn navigate(&self, screen: Screen) -> Result<Screen, GateError> {
        if !self.authenticated {
            return Err(GateError::LoginRequired);
        }
        match screen {
            Screen::ProfileSetup | Screen::ResumeUpload => Ok(screen),
            Screen::AiIntake if self.can_access_intake() => Ok(screen),
            Screen::AiIntake => Err(GateError::PrerequisiteNotMet {
                screen,
                warning: "Please upload your resume first!",
            }),
            Screen::PracticeInterview if self.can_access_practice_interview() => Ok(screen),
            Screen::PracticeInterview => Err(GateError::PrerequisiteNotMet {
                screen,
                warning: "Please complete the AI intake interview first!",
            }),
        }
    }

    /// Screens the session can currently enter, in sidebar order.
    pub fn reachable_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|screen| self.navigate(*screen).is_ok())
            .collect()
    }
}
