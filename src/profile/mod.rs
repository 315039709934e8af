//! Profile setup form: the draft model, its catalogues and validation.

pub mod model;

pub use model::{
    BadgeKind, HOBBIES, Industry, PERSONALITY_TYPES, ProfileDraft, ProfileOptions, SALARY_CEILING,
    SALARY_FLOOR, SKILLS, SalaryRange,
};
