use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::diagnostic::lead::{
    LeadAck, LeadForm, LeadGateway, LeadPayload, LeadSubmissionService, TransportError,
};
use crate::workflows::diagnostic::router::diagnostic_router;

/// Gateway double that records every payload it is handed.
#[derive(Debug, Default)]
pub(super) struct RecordingGateway {
    sent: Mutex<Vec<LeadPayload>>,
}

impl RecordingGateway {
    pub(super) fn sent(&self) -> Vec<LeadPayload> {
        self.sent.lock().expect("gateway mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadGateway for RecordingGateway {
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<LeadAck, TransportError> {
        self.sent
            .lock()
            .expect("gateway mutex poisoned")
            .push(payload.clone());
        Ok(LeadAck::now())
    }
}

/// Gateway double whose transport always fails, counting attempts.
#[derive(Debug, Default)]
pub(super) struct UnreachableGateway {
    attempts: Mutex<usize>,
}

impl UnreachableGateway {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("gateway mutex poisoned")
    }
}

#[async_trait]
impl LeadGateway for UnreachableGateway {
    async fn submit_lead(&self, _payload: &LeadPayload) -> Result<LeadAck, TransportError> {
        *self.attempts.lock().expect("gateway mutex poisoned") += 1;
        Err(TransportError::Unreachable("connection refused".to_string()))
    }
}

/// Gateway double that never answers, counting attempts.
#[derive(Debug, Default)]
pub(super) struct StalledGateway {
    attempts: Mutex<usize>,
}

impl StalledGateway {
    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("gateway mutex poisoned")
    }
}

#[async_trait]
impl LeadGateway for StalledGateway {
    async fn submit_lead(&self, _payload: &LeadPayload) -> Result<LeadAck, TransportError> {
        *self.attempts.lock().expect("gateway mutex poisoned") += 1;
        std::future::pending().await
    }
}

pub(super) fn filled_form() -> LeadForm {
    LeadForm {
        company_name: "有限会社みなと製作所".to_string(),
        name: "佐藤 花子".to_string(),
        email: "hanako@minato.example.jp".to_string(),
        concerns: "見積作成に毎日1時間かかっています".to_string(),
    }
}

pub(super) fn recording_service() -> (Arc<LeadSubmissionService<RecordingGateway>>, Arc<RecordingGateway>) {
    let gateway = Arc::new(RecordingGateway::default());
    let service = Arc::new(LeadSubmissionService::new(gateway.clone()));
    (service, gateway)
}

pub(super) fn router_with_recording_gateway() -> (axum::Router, Arc<RecordingGateway>) {
    let (service, gateway) = recording_service();
    (diagnostic_router(service), gateway)
}

pub(super) async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
