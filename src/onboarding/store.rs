//! ProgressStore — shared onboarding progress with load-on-init and
//! save-on-mutation persistence.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::store::SettingsStore;

use super::state::{CompletionMap, ProgressState};
use super::steps::OnboardingStep;

/// Settings keys used for progress persistence.
pub mod settings_keys {
    /// Key for the ProgressState JSON blob.
    pub const ONBOARDING_PROGRESS: &str = "onboarding-progress";
    /// Default user ID (one applicant per client).
    pub const DEFAULT_USER: &str = "default";
}

/// Checklist view rendered by the UI and the status route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressChecklist {
    pub steps: Vec<OnboardingStep>,
    pub current_step: String,
    pub progress: u8,
    pub completed: usize,
    pub total: usize,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
}

impl From<&ProgressState> for ProgressChecklist {
    fn from(state: &ProgressState) -> Self {
        Self {
            steps: state.steps.clone(),
            current_step: state.current_step.clone(),
            progress: state.progress(),
            completed: state.completed_count(),
            total: state.steps.len(),
            is_complete: state.is_complete(),
            next_step: state.next_incomplete_step().map(|s| s.id.clone()),
        }
    }
}

/// Process-wide onboarding progress.
///
/// Mutations hold the write lock until their snapshot is stored. Storage
/// failures are logged and never surfaced; the in-memory state stays
/// authoritative for the session.
pub struct ProgressStore {
    db: Arc<dyn SettingsStore>,
    state: RwLock<ProgressState>,
}

impl ProgressStore {
    /// Load persisted progress, falling back to the seed state.
    pub async fn load(db: Arc<dyn SettingsStore>) -> Self {
        let state = match db
            .get_setting(
                settings_keys::DEFAULT_USER,
                settings_keys::ONBOARDING_PROGRESS,
            )
            .await
        {
            Ok(Some(value)) => match serde_json::from_value::<ProgressState>(value) {
                Ok(persisted) => ProgressState::restore(persisted),
                Err(e) => {
                    warn!("Ignoring unreadable onboarding progress: {}", e);
                    ProgressState::default()
                }
            },
            Ok(None) => ProgressState::default(),
            Err(e) => {
                warn!("Failed to load onboarding progress: {}", e);
                ProgressState::default()
            }
        };

        Self {
            db,
            state: RwLock::new(state),
        }
    }

    /// Mark a step completed. Unknown ids are ignored.
    pub async fn set_step_completed(&self, id: &str) {
        let mut state = self.state.write().await;
        if state.set_step_completed(id) {
            debug!(step = id, "Step completed");
            self.persist_state(&state).await;
        }
    }

    /// Set the active step without validating the id.
    pub async fn set_current_step(&self, id: &str) {
        let mut state = self.state.write().await;
        if state.set_current_step(id) {
            debug!(step = id, "Current step changed");
            self.persist_state(&state).await;
        }
    }

    /// Merge backend-derived flags. Never clears a completed step.
    pub async fn hydrate_steps(&self, flags: &CompletionMap) -> usize {
        let mut state = self.state.write().await;
        let newly_completed = state.hydrate(flags);
        if newly_completed > 0 {
            debug!(newly_completed, "Hydrated onboarding steps");
            self.persist_state(&state).await;
        }
        newly_completed
    }

    /// Restore the seed state and persist it.
    pub async fn reset_progress(&self) {
        let mut state = self.state.write().await;
        state.reset();
        debug!("Onboarding progress reset");
        self.persist_state(&state).await;
    }

    /// Completion percentage, rounded to the nearest integer.
    pub async fn get_progress(&self) -> u8 {
        self.state.read().await.progress()
    }

    pub async fn current_step(&self) -> String {
        self.state.read().await.current_step.clone()
    }

    pub async fn steps(&self) -> Vec<OnboardingStep> {
        self.state.read().await.steps.clone()
    }

    pub async fn is_complete(&self) -> bool {
        self.state.read().await.is_complete()
    }

    pub async fn next_incomplete_step(&self) -> Option<OnboardingStep> {
        self.state.read().await.next_incomplete_step().cloned()
    }

    pub async fn snapshot(&self) -> ProgressState {
        self.state.read().await.clone()
    }

    pub async fn checklist(&self) -> ProgressChecklist {
        ProgressChecklist::from(&*self.state.read().await)
    }

    /// Run `f` against the current state under the read lock.
    pub(crate) async fn with_state<R>(&self, f: impl FnOnce(&ProgressState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Persist `state` to the settings table.
    ///
    /// Callers hold the write guard until this returns, so snapshots reach
    /// storage in mutation order.
    async fn persist_state(&self, state: &ProgressState) {
        let value = match serde_json::to_value(state) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to serialize onboarding progress: {}", e);
                return;
            }
        };
        if let Err(e) = self
            .db
            .set_setting(
                settings_keys::DEFAULT_USER,
                settings_keys::ONBOARDING_PROGRESS,
                &value,
            )
            .await
        {
            warn!("Failed to persist onboarding progress: {}", e);
        }
    }
}
