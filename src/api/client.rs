//! HTTP implementation of [`ProfileApi`] over `reqwest`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;

use super::envelope::Payload;
use super::model::{ApplicantProfile, ProfileRecord};
use super::{ProfileApi, endpoints};

/// Profiles backend client.
pub struct HttpProfileApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl HttpProfileApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// GET an endpoint and classify its body.
    async fn get_payload(&self, endpoint: &str) -> Result<Payload, ApiError> {
        let mut request = self.client.get(self.url(endpoint));
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| ApiError::RequestFailed {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Payload::from_value(body))
    }

    async fn get_list(&self, endpoint: &str) -> Result<Vec<ProfileRecord>, ApiError> {
        Ok(self.get_payload(endpoint).await?.into_list())
    }
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn applicant_profile(&self) -> Result<Option<ApplicantProfile>, ApiError> {
        self.get_payload(endpoints::APPLICANT_PROFILE)
            .await?
            .into_object()
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoints::APPLICANT_PROFILE.to_string(),
                reason: e.to_string(),
            })
    }

    async fn education(&self) -> Result<Vec<ProfileRecord>, ApiError> {
        self.get_list(endpoints::EDUCATION).await
    }

    async fn experience(&self) -> Result<Vec<ProfileRecord>, ApiError> {
        self.get_list(endpoints::EXPERIENCE).await
    }

    async fn certifications(&self) -> Result<Vec<ProfileRecord>, ApiError> {
        self.get_list(endpoints::CERTIFICATIONS).await
    }
}
