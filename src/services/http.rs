//! `reqwest` implementation of the collaborator calls.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ProfileServices, ServiceError, PERSONA_ENDPOINT, SCRAPE_ENDPOINT};
use crate::models::{PersonaRecord, ProfileSnapshot};

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    username: &'a str,
}

/// Talks to a service exposing `POST /scrape` and `POST /generate_persona`.
pub struct HttpProfileServices {
    client: Client,
    base_url: String,
}

impl HttpProfileServices {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, endpoint: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/{}", base, endpoint)
    }

    async fn post_json<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &T,
    ) -> Result<R, ServiceError> {
        let url = self.api_url(endpoint);
        tracing::debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", url, e);
                ServiceError::Request {
                    endpoint,
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| ServiceError::Request {
            endpoint,
            reason: format!("Failed to read body: {}", e),
        })?;
        tracing::debug!("{} response status: {}", endpoint, status);

        if !status.is_success() {
            tracing::debug!("{} error body: {}", endpoint, response_text);
            return Err(ServiceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| ServiceError::Decode {
            endpoint,
            reason: format!("JSON parse error: {}", e),
        })
    }
}

#[async_trait]
impl ProfileServices for HttpProfileServices {
    async fn scrape(&self, handle: &str) -> Result<ProfileSnapshot, ServiceError> {
        self.post_json(SCRAPE_ENDPOINT, &ScrapeRequest { username: handle })
            .await
    }

    async fn generate_persona(
        &self,
        snapshot: &ProfileSnapshot,
    ) -> Result<PersonaRecord, ServiceError> {
        self.post_json(PERSONA_ENDPOINT, snapshot).await
    }
}
