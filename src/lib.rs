//! Interview Prep: onboarding progress, a scripted intake interview and
//! practice questions for job seekers.

pub mod api;
pub mod backends;
pub mod config;
pub mod error;
pub mod intake;
pub mod practice;
pub mod profile;
pub mod resume;
pub mod service;
pub mod session;
