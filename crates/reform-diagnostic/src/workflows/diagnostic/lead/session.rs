use serde::Serialize;

use super::form::{LeadField, LeadForm, ValidationErrors};
use super::gateway::{LeadAck, LeadGateway, LeadPayload, TransportError};
use super::{LeadSubmissionError, FAILURE_MESSAGE, SUCCESS_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// View-owned order-sheet state: field values, inline errors and the banner.
#[derive(Debug, Clone)]
pub struct LeadFormSession {
    form: LeadForm,
    errors: ValidationErrors,
    status: SubmissionStatus,
    banner: Option<&'static str>,
}

impl Default for LeadFormSession {
    fn default() -> Self {
        Self::new(LeadForm::default())
    }
}

impl LeadFormSession {
    pub fn new(form: LeadForm) -> Self {
        Self {
            form,
            errors: ValidationErrors::default(),
            status: SubmissionStatus::Idle,
            banner: None,
        }
    }

    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.banner
    }

    /// The submit control is disabled while this is true.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Change one value; errors are left untouched.
    pub fn update_field(&mut self, field: LeadField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Drop the inline error shown for `field`, if any.
    pub fn clear_error_for(&mut self, field: LeadField) -> bool {
        self.errors.remove(field).is_some()
    }

    /// What an edit event does: update the value, then clear that field's error.
    pub fn edit(&mut self, field: LeadField, value: impl Into<String>) {
        self.update_field(field, value);
        self.clear_error_for(field);
    }

    /// Validate and enter `Submitting`. Refused while another attempt is in flight.
    pub fn begin_submit(&mut self) -> Result<LeadPayload, LeadSubmissionError> {
        if self.is_submitting() {
            return Err(LeadSubmissionError::InFlight);
        }

        match self.form.validate() {
            Ok(payload) => {
                self.errors = ValidationErrors::default();
                self.status = SubmissionStatus::Submitting;
                self.banner = None;
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(LeadSubmissionError::Validation(errors))
            }
        }
    }

    /// Apply the transport outcome of the attempt started by `begin_submit`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<LeadAck, TransportError>,
    ) -> Result<LeadAck, LeadSubmissionError> {
        match outcome {
            Ok(ack) => {
                self.form = LeadForm::default();
                self.status = SubmissionStatus::Succeeded;
                self.banner = Some(SUCCESS_MESSAGE);
                Ok(ack)
            }
            Err(err) => {
                self.status = SubmissionStatus::Failed;
                self.banner = Some(FAILURE_MESSAGE);
                Err(LeadSubmissionError::Transport(err))
            }
        }
    }

    /// Release the in-flight guard for an attempt that will never report back.
    ///
    /// Entered values are kept and no banner is shown. Returns `false` when no
    /// attempt was in flight.
    pub fn abandon_submit(&mut self) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.status = SubmissionStatus::Idle;
        true
    }

    /// Single best-effort attempt; no retry on failure.
    ///
    /// Dropping the returned future before the gateway answers abandons the
    /// attempt, so the form can be submitted again.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<LeadAck, LeadSubmissionError>
    where
        G: LeadGateway + ?Sized,
    {
        let payload = self.begin_submit()?;
        let attempt = PendingAttempt {
            session: self,
            settled: false,
        };
        let outcome = gateway.submit_lead(&payload).await;
        attempt.settle(outcome)
    }
}

/// Holds the session while a gateway call is outstanding.
struct PendingAttempt<'a> {
    session: &'a mut LeadFormSession,
    settled: bool,
}

impl PendingAttempt<'_> {
    fn settle(
        mut self,
        outcome: Result<LeadAck, TransportError>,
    ) -> Result<LeadAck, LeadSubmissionError> {
        self.settled = true;
        self.session.finish_submit(outcome)
    }
}

impl Drop for PendingAttempt<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.abandon_submit();
        }
    }
}
