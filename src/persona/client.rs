//! Persona generation client
//!
//! Talks to the persona service over HTTP: one `POST /generate-persona` per
//! submission and `GET /health` for health checks. No retries; a failed call is
//! reported once and the user submits again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

use super::types::{ErrorDetail, PersonaRequest, PersonaResult, ServiceHealth};

/// Anything that can turn submitted answers into a persona
#[async_trait]
pub trait PersonaGenerator: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Base address of the service
    fn endpoint(&self) -> &str;

    /// Generate a persona for one submission
    async fn generate(&self, request: &PersonaRequest) -> Result<PersonaResult>;

    /// Check the service. A down service is reported, not returned as an error.
    async fn health_check(&self) -> Result<ServiceHealth>;
}

// ─────────────────────────────────────────────────────────────────
// HTTP Client
// ─────────────────────────────────────────────────────────────────

/// HTTP implementation of [`PersonaGenerator`]
pub struct HttpPersonaClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl HttpPersonaClient {
    /// Create a client for the configured service
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .user_agent(crate::version::user_agent())
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, timeout_secs = config.timeout_secs, "Persona client created");

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn transport_error(&self, url: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::SubmissionTimeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            Error::submission_failed(url, e.to_string())
        }
    }
}

#[async_trait]
impl PersonaGenerator for HttpPersonaClient {
    fn name(&self) -> &'static str {
        "http"
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn generate(&self, request: &PersonaRequest) -> Result<PersonaResult> {
        let url = self.url("generate-persona");
        debug!(url = %url, "Submitting answers");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        if !status.is_success() {
            let detail = ErrorDetail::from_body(&String::from_utf8_lossy(&body));
            warn!(status = status.as_u16(), detail = %detail, "Persona service rejected submission");
            return Err(Error::ServiceStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let result = PersonaResult::from_slice(&body)?;
        info!(
            tags = result.persona_tags.len(),
            opportunities = result.recommended_opportunities.len(),
            "Persona generated"
        );
        Ok(result)
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        let url = self.url("health");

        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => Ok(ServiceHealth {
                operational: true,
                endpoint: self.base_url.clone(),
                error: None,
            }),
            Ok(resp) => Ok(ServiceHealth {
                operational: false,
                endpoint: self.base_url.clone(),
                error: Some(format!("HTTP {}", resp.status())),
            }),
            Err(e) => Ok(ServiceHealth {
                operational: false,
                endpoint: self.base_url.clone(),
                error: Some(format!("Connection failed: {}", e)),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
