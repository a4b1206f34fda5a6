//! Onboarding progress state — the step list plus the active step.
//!
//! Pure data and transitions. Persistence and sharing live in
//! [`super::store::ProgressStore`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::steps::{OnboardingStep, first_step_id, seed_steps};

/// Backend-derived completion flags keyed by step id.
pub type CompletionMap = BTreeMap<String, bool>;

/// Persisted onboarding progress.
///
/// Step identity and order are fixed by the seed registry; only the
/// `completed` flags and `current_step` change at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub steps: Vec<OnboardingStep>,
    #[serde(alias = "currentStep")]
    pub current_step: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            steps: seed_steps(),
            current_step: first_step_id().to_string(),
        }
    }
}

impl ProgressState {
    /// Rebuild state from a persisted snapshot.
    ///
    /// Seed order and names win. Completion flags carry over for ids the
    /// seed still knows; anything else in the snapshot is dropped.
    pub fn restore(persisted: ProgressState) -> Self {
        let mut state = Self::default();
        for step in state.steps.iter_mut() {
            if let Some(saved) = persisted.steps.iter().find(|s| s.id == step.id) {
                step.completed = saved.completed;
            }
        }
        state.current_step = persisted.current_step;
        state
    }

    /// Mark a step completed. Returns `true` if the flag changed.
    pub fn set_step_completed(&mut self, id: &str) -> bool {
        match self.steps.iter_mut().find(|s| s.id == id) {
            Some(step) if !step.completed => {
                step.completed = true;
                true
            }
            _ => false,
        }
    }

    /// Set the active step. The id is not checked against the registry.
    /// Returns `true` if the value changed.
    pub fn set_current_step(&mut self, id: &str) -> bool {
        if self.current_step == id {
            return false;
        }
        self.current_step = id.to_string();
        true
    }

    /// Apply backend-derived flags. Only `true` entries are applied and
    /// nothing is ever cleared. Returns the number of steps newly completed.
    pub fn hydrate(&mut self, flags: &CompletionMap) -> usize {
        let mut newly_completed = 0;
        for (id, done) in flags {
            if *done && self.set_step_completed(id) {
                newly_completed += 1;
            }
        }
        newly_completed
    }

    /// Restore the seed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// Percentage of completed steps, rounded half up. 0 with no steps.
    pub fn progress(&self) -> u8 {
        let total = self.steps.len();
        if total == 0 {
            return 0;
        }
        let done = self.completed_count();
        ((200 * done + total) / (2 * total)) as u8
    }

    pub fn is_complete(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.completed)
    }

    pub fn step(&self, id: &str) -> Option<&OnboardingStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// First step in display order that is not completed yet.
    pub fn next_incomplete_step(&self) -> Option<&OnboardingStep> {
        self.steps.iter().find(|s| !s.completed)
    }

    /// Look up a step by its route segment.
    pub fn step_for_path(&self, segment: &str) -> Option<&OnboardingStep> {
        self.steps.iter().find(|s| s.path == segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::steps::step_ids;

    fn completed_ids(state: &ProgressState) -> Vec<&str> {
        state
            .steps
            .iter()
            .filter(|s| s.completed)
            .map(|s| s.id.as_str())
            .collect()
    }

    #[test]
    fn seed_progress_is_zero() {
        let state = ProgressState::default();
        assert_eq!(state.progress(), 0);
        assert_eq!(state.current_step, step_ids::ACCOUNT_INFO);
    }

    #[test]
    fn all_completed_is_one_hundred() {
        let mut state = ProgressState::default();
        let ids: Vec<String> = state.steps.iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            state.set_step_completed(id);
        }
        assert_eq!(state.progress(), 100);
        assert!(state.is_complete());
        assert!(state.next_incomplete_step().is_none());
    }

    #[test]
    fn partial_progress_rounds_to_nearest() {
        let mut state = ProgressState::default();
        let ids: Vec<String> = state.steps.iter().map(|s| s.id.clone()).collect();
        let n = ids.len() as f64;
        for (k, id) in ids.iter().enumerate() {
            state.set_step_completed(id);
            let expected = (100.0 * (k + 1) as f64 / n).round() as u8;
            assert_eq!(state.progress(), expected, "after {} steps", k + 1);
        }
    }

    #[test]
    fn one_of_eight_rounds_half_up() {
        let mut state = ProgressState::default();
        state.set_step_completed(step_ids::BIO);
        // 12.5 -> 13
        assert_eq!(state.progress(), 13);
    }

    #[test]
    fn empty_steps_progress_is_zero() {
        let state = ProgressState {
            steps: Vec::new(),
            current_step: String::new(),
        };
        assert_eq!(state.progress(), 0);
        assert!(!state.is_complete());
    }

    #[test]
    fn set_step_completed_is_idempotent() {
        let mut state = ProgressState::default();
        assert!(state.set_step_completed(step_ids::ADDRESS));
        assert!(!state.set_step_completed(step_ids::ADDRESS));
        assert_eq!(completed_ids(&state), [step_ids::ADDRESS]);
    }

    #[test]
    fn unknown_step_leaves_state_unchanged() {
        let mut state = ProgressState::default();
        let before = state.clone();
        assert!(!state.set_step_completed("nonexistent"));
        assert_eq!(state, before);
    }

    #[test]
    fn set_current_step_accepts_any_id() {
        let mut state = ProgressState::default();
        assert!(state.set_current_step("whatever"));
        assert_eq!(state.current_step, "whatever");
        assert!(!state.set_current_step("whatever"));
    }

    #[test]
    fn hydrate_empty_map_is_noop() {
        let mut state = ProgressState::default();
        let before = state.clone();
        assert_eq!(state.hydrate(&CompletionMap::new()), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn hydrate_sets_only_truthy_entries() {
        let mut state = ProgressState::default();
        let flags = CompletionMap::from([
            ("bio".to_string(), true),
            ("skill".to_string(), false),
            ("unknown".to_string(), true),
        ]);
        assert_eq!(state.hydrate(&flags), 1);
        assert_eq!(completed_ids(&state), ["bio"]);
    }

    #[test]
    fn hydrate_is_monotonic() {
        let mut state = ProgressState::default();
        state.hydrate(&CompletionMap::from([
            ("bio".to_string(), true),
            ("education".to_string(), true),
        ]));
        state.hydrate(&CompletionMap::from([
            ("bio".to_string(), false),
            ("address".to_string(), true),
        ]));
        assert_eq!(completed_ids(&state), ["address", "bio", "education"]);
    }

    #[test]
    fn reset_restores_seed() {
        let mut state = ProgressState::default();
        state.set_step_completed(step_ids::EXPERIENCE);
        state.set_current_step(step_ids::EXPERIENCE);
        state.reset();
        assert_eq!(state.progress(), 0);
        assert_eq!(state.current_step, step_ids::ACCOUNT_INFO);
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn restore_merges_flags_by_id() {
        let persisted = ProgressState {
            steps: vec![
                OnboardingStep {
                    id: "education".to_string(),
                    name: "Old name".to_string(),
                    path: "old-path".to_string(),
                    completed: true,
                },
                OnboardingStep {
                    id: "retired-step".to_string(),
                    name: "Retired".to_string(),
                    path: "retired".to_string(),
                    completed: true,
                },
            ],
            current_step: "education".to_string(),
        };
        let state = ProgressState::restore(persisted);
        assert_eq!(state.steps.len(), 8);
        assert_eq!(completed_ids(&state), ["education"]);
        let education = state.step("education").unwrap();
        assert_eq!(education.name, "Education");
        assert_eq!(education.path, "education");
        assert_eq!(state.current_step, "education");
    }

    #[test]
    fn step_for_path_matches_empty_segment_to_first_step() {
        let state = ProgressState::default();
        assert_eq!(state.step_for_path("").unwrap().id, step_ids::ACCOUNT_INFO);
        assert_eq!(state.step_for_path("address").unwrap().id, step_ids::ADDRESS);
        assert!(state.step_for_path("nope").is_none());
    }

    #[test]
    fn deserializes_camel_case_current_step() {
        let json = serde_json::json!({
            "steps": [],
            "currentStep": "bio"
        });
        let state: ProgressState = serde_json::from_value(json).unwrap();
        assert_eq!(state.current_step, "bio");
    }
}
