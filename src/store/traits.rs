//! `SettingsStore` trait — the persistence port for onboarding progress.
//!
//! Values are JSON blobs addressed by `(user_id, key)`. The progress store
//! loads once on init and writes the full snapshot after every mutation.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic key/value settings storage.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Get a setting, or `None` if it was never written.
    async fn get_setting(
        &self,
        user_id: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, DatabaseError>;

    /// Insert or replace a setting.
    async fn set_setting(
        &self,
        user_id: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<(), DatabaseError>;
}
