//! Onboarding progress tracking for the jobmatch applicant app.

pub mod api;
pub mod config;
pub mod error;
pub mod onboarding;
pub mod store;
