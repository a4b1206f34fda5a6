//! Keeps the current onboarding step in sync with navigation.

use std::sync::Arc;

use tracing::debug;

use crate::config::DEFAULT_ONBOARDING_BASE;

use super::store::ProgressStore;

/// Final path segment of `route`, ignoring query, fragment and trailing
/// slashes. The onboarding root itself maps to `""`.
pub fn route_segment(route: &str, base: &str) -> String {
    let path = route
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if path == base.trim_end_matches('/') {
        return String::new();
    }

    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Marks the step matching the current route as active.
pub struct RouteBinder {
    store: Arc<ProgressStore>,
    base: String,
}

impl RouteBinder {
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self::with_base(store, DEFAULT_ONBOARDING_BASE)
    }

    pub fn with_base(store: Arc<ProgressStore>, base: impl Into<String>) -> Self {
        Self {
            store,
            base: base.into(),
        }
    }

    /// Handle a navigation change. Returns the id of the step that became
    /// current, or `None` when the route matches no step (state untouched).
    pub async fn on_navigate(&self, route: &str) -> Option<String> {
        let segment = route_segment(route, &self.base);
        let step_id = self
            .store
            .with_state(|state| state.step_for_path(&segment).map(|s| s.id.clone()))
            .await;

        match step_id {
            Some(id) => {
                self.store.set_current_step(&id).await;
                Some(id)
            }
            None => {
                debug!(route, segment = %segment, "Route matches no onboarding step");
                None
            }
        }
    }
}
