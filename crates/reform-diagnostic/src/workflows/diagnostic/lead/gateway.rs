use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LeadConfig;

/// Wire body accepted by the lead endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub company: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Acknowledgement that the request left without a transport failure.
///
/// The endpoint's own verdict is never observed, so an ack does not mean the
/// lead was accepted downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadAck {
    pub dispatched_at: DateTime<Utc>,
}

impl LeadAck {
    pub fn now() -> Self {
        Self {
            dispatched_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("lead endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("lead request could not be sent: {0}")]
    Request(String),
}

/// Outbound capability for posting a validated lead. One call, one request.
#[async_trait]
pub trait LeadGateway: Debug + Send + Sync {
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<LeadAck, TransportError>;
}

/// Posts leads as JSON and deliberately ignores the response.
#[derive(Debug, Clone)]
pub struct HttpLeadGateway {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpLeadGateway {
    pub fn new(config: &LeadConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config.endpoint_url.clone())
    }

    pub fn with_client(client: reqwest::Client, endpoint_url: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn map_error(err: reqwest::Error) -> TransportError {
        if err.is_connect() || err.is_timeout() {
            TransportError::Unreachable(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl LeadGateway for HttpLeadGateway {
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<LeadAck, TransportError> {
        self.client
            .post(&self.endpoint_url)
            .json(payload)
            .send()
            .await
            .map_err(Self::map_error)?;

        debug!(endpoint = %self.endpoint_url, "lead request dispatched");
        Ok(LeadAck::now())
    }
}
