//! Step 4: order-sheet validation and best-effort lead submission.

pub mod form;
pub mod gateway;
pub mod service;
pub mod session;

pub use form::{
    is_valid_email, FieldErrorView, LeadField, LeadForm, ValidationError, ValidationErrors,
};
pub use gateway::{HttpLeadGateway, LeadAck, LeadGateway, LeadPayload, TransportError};
pub use service::{LeadReceipt, LeadSubmissionService};
pub use session::{LeadFormSession, SubmissionStatus};

pub const SUCCESS_MESSAGE: &str = "送信が完了しました。担当者よりご連絡いたします。";
pub const FAILURE_MESSAGE: &str = "送信に失敗しました。しばらく時間をおいて再度お試しください。";

#[derive(Debug, thiserror::Error)]
pub enum LeadSubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("a lead submission is already in flight")]
    InFlight,
}

impl LeadSubmissionError {
    /// Banner text shown to the prospect.
    pub fn user_message(&self) -> &'static str {
        match self {
            LeadSubmissionError::Validation(_) => "入力内容を確認してください",
            LeadSubmissionError::Transport(_) => FAILURE_MESSAGE,
            LeadSubmissionError::InFlight => "送信中です。しばらくお待ちください。",
        }
    }
}
