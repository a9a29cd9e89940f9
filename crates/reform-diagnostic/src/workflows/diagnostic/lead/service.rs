use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::form::LeadForm;
use super::gateway::LeadGateway;
use super::{LeadSubmissionError, SUCCESS_MESSAGE};
use crate::workflows::diagnostic::health_check::DiagnosticResult;

/// Stateless submission path used by the HTTP API: validate, post once, report.
pub struct LeadSubmissionService<G> {
    gateway: Arc<G>,
}

impl<G> LeadSubmissionService<G>
where
    G: LeadGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// `health` is context for logging only; it never reaches the payload.
    pub async fn submit(
        &self,
        form: &LeadForm,
        health: Option<DiagnosticResult>,
    ) -> Result<LeadReceipt, LeadSubmissionError> {
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                info!(invalid_fields = errors.len(), "lead rejected by validation");
                return Err(errors.into());
            }
        };

        match self.gateway.submit_lead(&payload).await {
            Ok(ack) => {
                info!(
                    health_score = ?health.map(|result| result.total_score()),
                    health_category = ?health.map(|result| result.category()),
                    has_concerns = !payload.message.trim().is_empty(),
                    "lead dispatched"
                );
                Ok(LeadReceipt {
                    dispatched_at: ack.dispatched_at,
                    message: SUCCESS_MESSAGE,
                })
            }
            Err(err) => {
                warn!(error = %err, "lead submission failed");
                Err(err.into())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadReceipt {
    pub dispatched_at: DateTime<Utc>,
    pub message: &'static str,
}
