use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use reform_diagnostic::workflows::diagnostic::{
    LeadAck, LeadGateway, LeadPayload, PayRule, TransportError,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps demo leads in memory instead of posting them.
#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingLeadGateway {
    sent: Arc<Mutex<Vec<LeadPayload>>>,
}

impl RecordingLeadGateway {
    pub(crate) fn sent(&self) -> Vec<LeadPayload> {
        self.sent.lock().expect("gateway mutex poisoned").clone()
    }
}

#[async_trait]
impl LeadGateway for RecordingLeadGateway {
    async fn submit_lead(&self, payload: &LeadPayload) -> Result<LeadAck, TransportError> {
        let mut guard = self.sent.lock().expect("gateway mutex poisoned");
        guard.push(payload.clone());
        Ok(LeadAck::now())
    }
}

pub(crate) fn parse_pay_rule(raw: &str) -> Result<PayRule, String> {
    raw.parse::<PayRule>().map_err(|err| err.to_string())
}
