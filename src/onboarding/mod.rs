//! Applicant onboarding checklist.
//!
//! A fixed registry of steps, a persisted store tracking which are done and
//! which is active, a hydrator that derives completion from the profiles
//! backend, and a binder that follows navigation.

pub mod hydrator;
pub mod navigation;
pub mod routes;
pub mod state;
pub mod steps;
pub mod store;

pub use hydrator::{
    CompletionHydrator, HydrationReport, MountGuard, MountToken, ProfileSnapshot, Resource,
    derive_completion,
};
pub use navigation::{RouteBinder, route_segment};
pub use routes::{OnboardingRouteState, onboarding_routes};
pub use state::{CompletionMap, ProgressState};
pub use steps::{OnboardingStep, seed_steps, step_ids};
pub use store::{ProgressChecklist, ProgressStore};
