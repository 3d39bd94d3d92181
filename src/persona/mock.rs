//! Mock persona generator for testing
//!
//! Returns a fixed persona or a configured failure without touching the
//! network, and records every request it receives.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::error::{Error, Result};

use super::client::PersonaGenerator;
use super::types::{PersonaRequest, PersonaResult, ServiceHealth};

/// How the mock answers a generation call
#[derive(Debug, Clone)]
pub enum MockReply {
    Persona(PersonaResult),
    ServiceError { status: u16, detail: String },
    Malformed,
    Timeout,
}

/// Mock implementation of [`PersonaGenerator`]
pub struct MockPersonaGenerator {
    reply: RwLock<MockReply>,
    latency: Duration,
    requests: RwLock<Vec<Value>>,
}

impl MockPersonaGenerator {
    /// Mock that always succeeds with [`sample_persona`]
    pub fn new() -> Self {
        Self::with_reply(MockReply::Persona(sample_persona()))
    }

    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            reply: RwLock::new(reply),
            latency: Duration::ZERO,
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::with_reply(MockReply::ServiceError {
            status: 500,
            detail: "All AI models failed".to_string(),
        })
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Change the reply for subsequent calls
    pub fn set_reply(&self, reply: MockReply) {
        *self.reply.write() = reply;
    }

    /// Number of generation calls received
    pub fn call_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Bodies of all generation calls, oldest first
    pub fn requests(&self) -> Vec<Value> {
        self.requests.read().clone()
    }
}

impl Default for MockPersonaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonaGenerator for MockPersonaGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn endpoint(&self) -> &str {
        "mock://persona"
    }

    async fn generate(&self, request: &PersonaRequest) -> Result<PersonaResult> {
        self.requests.write().push(request.as_json().clone());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let reply = self.reply.read().clone();
        match reply {
            MockReply::Persona(p) => Ok(p),
            MockReply::ServiceError { status, detail } => {
                Err(Error::ServiceStatus { status, detail })
            }
            MockReply::Malformed => Err(Error::malformed_response("missing field `strengths`")),
            MockReply::Timeout => Err(Error::SubmissionTimeout {
                url: "mock://persona/generate-persona".to_string(),
                timeout_ms: 0,
            }),
        }
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth {
            operational: true,
            endpoint: self.endpoint().to_string(),
            error: None,
        })
    }
}

/// A complete persona used by tests
pub fn sample_persona() -> PersonaResult {
    PersonaResult {
        persona_tags: vec!["Patient Capital".into(), "System Seeker".into()],
        persona_summary: "You prefer proven systems and are willing to wait for returns.".into(),
        investment_style: "Steady compounding through established brands.".into(),
        strengths: vec!["Discipline".into(), "Long horizon".into()],
        considerations: vec!["May pass on early upside".into()],
        recommended_opportunities: vec![
            "Multi-unit franchise with a manager".into(),
            "Revenue share in an established brand".into(),
        ],
        generated_at: Some("2025-01-01T00:00:00".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{AnswerStore, Catalog};

    fn request() -> PersonaRequest {
        PersonaRequest::from_answers(&AnswerStore::defaults(&Catalog::investor()))
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockPersonaGenerator::new();
        let result = mock.generate(&request()).await.unwrap();

        assert_eq!(result, sample_persona());
        assert_eq!(mock.call_count(), 1);
        assert_eq!(&mock.requests()[0], request().as_json());
    }

    #[tokio::test]
    async fn test_mock_failure_modes() {
        let mock = MockPersonaGenerator::failing();
        assert!(mock.generate(&request()).await.unwrap_err().is_submission_failure());

        mock.set_reply(MockReply::Malformed);
        assert!(matches!(
            mock.generate(&request()).await.unwrap_err(),
            Error::MalformedResponse { .. }
        ));

        mock.set_reply(MockReply::Timeout);
        assert!(matches!(
            mock.generate(&request()).await.unwrap_err(),
            Error::SubmissionTimeout { .. }
        ));
        assert_eq!(mock.call_count(), 3);
    }

    #[test]
    fn test_health_check() {
        let mock = MockPersonaGenerator::new();
        let health = tokio_test::block_on(mock.health_check()).unwrap();
        assert!(health.operational);
        assert_eq!(health.endpoint, "mock://persona");
        assert_eq!(mock.call_count(), 0);
    }
}
