//! Step registry — the fixed, ordered onboarding checklist.

use serde::{Deserialize, Serialize};

/// Stable step identifiers. These survive across persisted sessions.
pub mod step_ids {
    pub const ACCOUNT_INFO: &str = "account-info";
    pub const PERSONAL_INFORMATION: &str = "personal-information";
    pub const ADDRESS: &str = "address";
    pub const BIO: &str = "bio";
    pub const SKILL: &str = "skill";
    pub const EDUCATION: &str = "education";
    pub const EXPERIENCE: &str = "experience";
    pub const CERTIFICATES: &str = "certificates";
}

/// Seed table: `(id, display name, route segment)` in display order.
const SEED: &[(&str, &str, &str)] = &[
    (step_ids::ACCOUNT_INFO, "Account Info", ""),
    (
        step_ids::PERSONAL_INFORMATION,
        "Personal Information",
        "personal-information",
    ),
    (step_ids::ADDRESS, "Address", "address"),
    (step_ids::BIO, "Bio", "bio"),
    (step_ids::SKILL, "Skills", "skill"),
    (step_ids::EDUCATION, "Education", "education"),
    (step_ids::EXPERIENCE, "Experience", "experience"),
    (step_ids::CERTIFICATES, "Certificates", "certificates"),
];

/// One entry of the onboarding checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingStep {
    pub id: String,
    pub name: String,
    /// Route segment; empty for the first step.
    pub path: String,
    pub completed: bool,
}

impl OnboardingStep {
    pub fn new(id: &str, name: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            completed: false,
        }
    }
}

/// The seed registry with every step incomplete.
pub fn seed_steps() -> Vec<OnboardingStep> {
    SEED.iter()
        .map(|(id, name, path)| OnboardingStep::new(id, name, path))
        .collect()
}

/// Id of the first seed step, used as the default current step.
pub fn first_step_id() -> &'static str {
    SEED[0].0
}
