//! Read endpoints of the profiles backend that onboarding derives progress from.

pub mod client;
pub mod envelope;
pub mod model;

pub use client::HttpProfileApi;
pub use envelope::Payload;
pub use model::{ApplicantProfile, ProfileRecord};

use async_trait::async_trait;

use crate::error::ApiError;

/// Endpoint paths, relative to the API base URL.
pub mod endpoints {
    pub const APPLICANT_PROFILE: &str = "/profiles/applicant/me";
    pub const EDUCATION: &str = "/profiles/education";
    pub const EXPERIENCE: &str = "/profiles/experience";
    pub const CERTIFICATIONS: &str = "/profiles/certifications";
}

/// Read access to the applicant's profile resources.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// The applicant profile, or `None` if the backend has none.
    async fn applicant_profile(&self) -> Result<Option<ApplicantProfile>, ApiError>;

    async fn education(&self) -> Result<Vec<ProfileRecord>, ApiError>;

    async fn experience(&self) -> Result<Vec<ProfileRecord>, ApiError>;

    async fn certifications(&self) -> Result<Vec<ProfileRecord>, ApiError>;
}
