//! The four-step business reform diagnostic: health check, incentive
//! simulators, ROI simulator and the order sheet, tied together by the wizard.

pub mod health_check;
pub mod lead;
pub mod router;
pub mod simulators;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use health_check::{
    AnswerError, AnswerSelection, AnswerSet, DiagnosticResult, DiagnosticResultView,
    HealthCategory, HealthCheckProgress, QuestionId,
};
pub use lead::{
    HttpLeadGateway, LeadAck, LeadField, LeadForm, LeadFormSession, LeadGateway, LeadPayload,
    LeadReceipt, LeadSubmissionError, LeadSubmissionService, SubmissionStatus, TransportError,
    ValidationError, ValidationErrors,
};
pub use router::diagnostic_router;
pub use simulators::{
    simulate_incentive, simulate_roi, ChallengeCount, IncentiveOutcome, Payback, PayRule,
    PayRuleComparison, RoiInput, RoiOutcome, SimulatorInputError,
};
pub use wizard::{Step, StepError, Transition, WizardEffect, WizardEvent, WizardState};

/// Any recoverable failure raised while running the diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticError {
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Simulator(#[from] SimulatorInputError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Lead(#[from] LeadSubmissionError),
}
