//! Completion hydrator — derives finished steps from the profiles backend.
//!
//! The four resources are fetched concurrently and joined. Each fetch is
//! isolated: a failure only blanks that resource, so only the steps derived
//! from it stay incomplete. Results are dropped if the owning view was torn
//! down while the requests were in flight.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::model::filled;
use crate::api::{ApplicantProfile, ProfileApi, ProfileRecord};
use crate::error::ApiError;

use super::state::CompletionMap;
use super::steps::step_ids;
use super::store::ProgressStore;

/// Held by the view that started hydration. Dropping it marks the view as
/// unmounted; in-flight requests finish but their results are discarded.
#[derive(Debug)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn token(&self) -> MountToken {
        MountToken {
            mounted: Arc::clone(&self.mounted),
        }
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::Release);
    }
}

/// Cheap handle checked before writing hydration results.
#[derive(Debug, Clone)]
pub struct MountToken {
    mounted: Arc<AtomicBool>,
}

impl MountToken {
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }
}

/// A backend resource consulted during hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Profile,
    Education,
    Experience,
    Certifications,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profile => "profile",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Certifications => "certifications",
        };
        write!(f, "{s}")
    }
}

/// What the backend returned, with failed fetches already blanked.
#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    pub profile: Option<ApplicantProfile>,
    pub education: Vec<ProfileRecord>,
    pub experience: Vec<ProfileRecord>,
    pub certifications: Vec<ProfileRecord>,
}

/// Outcome of one hydration pass.
#[derive(Debug, Clone, Serialize)]
pub struct HydrationReport {
    /// Every derived flag, including the ones that came out false.
    pub flags: CompletionMap,
    /// Resources whose fetch failed and were treated as absent.
    pub failed: Vec<Resource>,
    /// Steps that flipped to completed in this pass.
    pub newly_completed: usize,
}

/// Derive per-step completion from fetched resources.
pub fn derive_completion(snapshot: &ProfileSnapshot) -> CompletionMap {
    let absent = ApplicantProfile::default();
    let p = snapshot.profile.as_ref().unwrap_or(&absent);

    let account_info = filled(&p.country) || filled(&p.photo_url) || filled(&p.work_position);
    let personal_information = filled(&p.first_name) && filled(&p.last_name) && filled(&p.gender);
    let address = filled(&p.country) && filled(&p.state) && filled(&p.city);
    let bio = p.bio.as_deref().is_some_and(|b| !b.trim().is_empty());
    let skill = !p.skills.is_empty();

    CompletionMap::from([
        (step_ids::ACCOUNT_INFO.to_string(), account_info),
        (
            step_ids::PERSONAL_INFORMATION.to_string(),
            personal_information,
        ),
        (step_ids::ADDRESS.to_string(), address),
        (step_ids::BIO.to_string(), bio),
        (step_ids::SKILL.to_string(), skill),
        (
            step_ids::EDUCATION.to_string(),
            !snapshot.education.is_empty(),
        ),
        (
            step_ids::EXPERIENCE.to_string(),
            !snapshot.experience.is_empty(),
        ),
        (
            step_ids::CERTIFICATES.to_string(),
            !snapshot.certifications.is_empty(),
        ),
    ])
}

/// Fetches backend resources and merges derived completion into the store.
pub struct CompletionHydrator {
    api: Arc<dyn ProfileApi>,
    store: Arc<ProgressStore>,
}

impl CompletionHydrator {
    pub fn new(api: Arc<dyn ProfileApi>, store: Arc<ProgressStore>) -> Self {
        Self { api, store }
    }

    /// Fetch all four resources concurrently. Failures are logged and
    /// reported, never propagated.
    pub async fn fetch_snapshot(&self) -> (ProfileSnapshot, Vec<Resource>) {
        let (profile, education, experience, certifications) = tokio::join!(
            self.api.applicant_profile(),
            self.api.education(),
            self.api.experience(),
            self.api.certifications(),
        );

        let mut failed = Vec::new();
        let snapshot = ProfileSnapshot {
            profile: recover(Resource::Profile, profile, &mut failed).flatten(),
            education: recover(Resource::Education, education, &mut failed).unwrap_or_default(),
            experience: recover(Resource::Experience, experience, &mut failed).unwrap_or_default(),
            certifications: recover(Resource::Certifications, certifications, &mut failed)
                .unwrap_or_default(),
        };
        (snapshot, failed)
    }

    /// Run one hydration pass. Returns `None` if the view unmounted before
    /// the fetches joined; the store is left untouched in that case.
    pub async fn hydrate(&self, mount: &MountToken) -> Option<HydrationReport> {
        let (snapshot, failed) = self.fetch_snapshot().await;

        if !mount.is_mounted() {
            info!("Onboarding view unmounted, discarding hydration results");
            return None;
        }

        let flags = derive_completion(&snapshot);
        let newly_completed = self.store.hydrate_steps(&flags).await;
        let progress = self.store.get_progress().await;

        info!(
            newly_completed,
            failed = failed.len(),
            progress,
            "Onboarding progress hydrated"
        );

        Some(HydrationReport {
            flags,
            failed,
            newly_completed,
        })
    }

    /// Start hydration in the background for a freshly mounted view.
    pub fn spawn(self: Arc<Self>, mount: MountToken) -> JoinHandle<Option<HydrationReport>> {
        tokio::spawn(async move { self.hydrate(&mount).await })
    }
}

fn recover<T>(
    resource: Resource,
    result: Result<T, ApiError>,
    failed: &mut Vec<Resource>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(%resource, "Hydration fetch failed, treating as absent: {}", e);
            failed.push(resource);
            None
        }
    }
}
