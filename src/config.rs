//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default onboarding base route.
pub const DEFAULT_ONBOARDING_BASE: &str = "/onboarding";

/// Connection settings for the profiles backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://api.example.org`.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<SecretString>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Path of the libSQL database holding persisted progress.
    pub db_path: PathBuf,
    /// Route prefix under which the onboarding wizard is mounted.
    pub onboarding_base: String,
    /// When set, the binary serves the status routes on this port.
    pub status_port: Option<u16>,
}

impl AppConfig {
    /// Build the configuration from `JOBMATCH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("JOBMATCH_API_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("JOBMATCH_API_URL".to_string()))?;

        let token = lookup("JOBMATCH_API_TOKEN")
            .filter(|s| !s.trim().is_empty())
            .map(SecretString::from);

        let timeout_secs: u64 = match lookup("JOBMATCH_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "JOBMATCH_API_TIMEOUT_SECS".to_string(),
                message: format!("{e}"),
            })?,
            None => 30,
        };

        let db_path = lookup("JOBMATCH_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/onboarding.db"));

        let onboarding_base =
            lookup("JOBMATCH_ONBOARDING_BASE").unwrap_or_else(|| DEFAULT_ONBOARDING_BASE.to_string());

        let status_port = match lookup("JOBMATCH_STATUS_PORT") {
            Some(raw) => Some(raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "JOBMATCH_STATUS_PORT".to_string(),
                message: format!("{e}"),
            })?),
            None => None,
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                token,
                timeout: Duration::from_secs(timeout_secs),
            },
            db_path,
            onboarding_base,
            status_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_applied() {
        let config = AppConfig::from_lookup(lookup(&[("JOBMATCH_API_URL", "http://localhost:3000")]))
            .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert!(config.api.token.is_none());
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.db_path, PathBuf::from("./data/onboarding.db"));
        assert_eq!(config.onboarding_base, "/onboarding");
        assert!(config.status_port.is_none());
    }

    #[test]
    fn missing_api_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "JOBMATCH_API_URL"));
    }

    #[test]
    fn reads_all_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JOBMATCH_API_URL", "https://api.example.org"),
            ("JOBMATCH_API_TOKEN", "tok-123"),
            ("JOBMATCH_API_TIMEOUT_SECS", "5"),
            ("JOBMATCH_DB_PATH", "/tmp/progress.db"),
            ("JOBMATCH_ONBOARDING_BASE", "/applicant/onboarding"),
            ("JOBMATCH_STATUS_PORT", "8088"),
        ]))
        .unwrap();
        assert_eq!(config.api.token.as_ref().unwrap().expose_secret(), "tok-123");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.db_path, PathBuf::from("/tmp/progress.db"));
        assert_eq!(config.onboarding_base, "/applicant/onboarding");
        assert_eq!(config.status_port, Some(8088));
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("JOBMATCH_API_URL", "http://localhost"),
            ("JOBMATCH_STATUS_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "JOBMATCH_STATUS_PORT"));
    }
}
