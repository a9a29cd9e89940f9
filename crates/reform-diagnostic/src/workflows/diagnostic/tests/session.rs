use std::time::Duration;

use super::common::*;
use crate::workflows::diagnostic::lead::{
    LeadAck, LeadField, LeadFormSession, LeadSubmissionError, SubmissionStatus, TransportError,
    ValidationError, FAILURE_MESSAGE, SUCCESS_MESSAGE,
};

#[test]
fn update_field_keeps_errors_until_cleared() {
    let mut session = LeadFormSession::default();
    let err = session.begin_submit().expect_err("empty form is invalid");
    assert!(matches!(err, LeadSubmissionError::Validation(ref errors) if errors.len() == 3));

    session.update_field(LeadField::Name, "佐藤");
    assert_eq!(session.form().name, "佐藤");
    assert_eq!(
        session.errors().get(LeadField::Name),
        Some(ValidationError::Required)
    );

    assert!(session.clear_error_for(LeadField::Name));
    assert_eq!(session.errors().get(LeadField::Name), None);
    assert!(!session.clear_error_for(LeadField::Name));
}

#[test]
fn edit_updates_value_then_clears_only_that_error() {
    let mut session = LeadFormSession::default();
    let _ = session.begin_submit();

    session.edit(LeadField::Email, "broken");
    assert_eq!(session.form().email, "broken");
    assert_eq!(session.errors().get(LeadField::Email), None);
    assert_eq!(
        session.errors().get(LeadField::CompanyName),
        Some(ValidationError::Required)
    );
    assert_eq!(session.status(), SubmissionStatus::Idle);
}

#[test]
fn second_submit_is_refused_while_in_flight() {
    let mut session = LeadFormSession::new(filled_form());

    let payload = session.begin_submit().expect("valid form");
    assert_eq!(payload.company, "有限会社みなと製作所");
    assert!(session.is_submitting());

    assert!(matches!(
        session.begin_submit(),
        Err(LeadSubmissionError::InFlight)
    ));

    session
        .finish_submit(Ok(LeadAck::now()))
        .expect("success applied");
    assert!(!session.is_submitting());
}

#[test]
fn transport_failure_keeps_entered_data() {
    let mut session = LeadFormSession::new(filled_form());
    session.begin_submit().expect("valid form");

    let err = session
        .finish_submit(Err(TransportError::Unreachable("dns".to_string())))
        .expect_err("failure reported");

    assert_eq!(err.user_message(), FAILURE_MESSAGE);
    assert_eq!(session.status(), SubmissionStatus::Failed);
    assert_eq!(session.banner(), Some(FAILURE_MESSAGE));
    assert_eq!(session.form(), &filled_form());
}

#[tokio::test]
async fn successful_submit_clears_form_and_sends_once() {
    let gateway = RecordingGateway::default();
    let mut session = LeadFormSession::new(filled_form());

    session.submit(&gateway).await.expect("submitted");

    assert_eq!(gateway.sent().len(), 1);
    assert_eq!(gateway.sent()[0].email, "hanako@minato.example.jp");
    assert!(session.form().is_blank());
    assert_eq!(session.status(), SubmissionStatus::Succeeded);
    assert_eq!(session.banner(), Some(SUCCESS_MESSAGE));
}

#[tokio::test]
async fn invalid_form_never_reaches_gateway() {
    let gateway = RecordingGateway::default();
    let mut form = filled_form();
    form.email = "not-an-email".to_string();
    let mut session = LeadFormSession::new(form);

    let err = session.submit(&gateway).await.expect_err("invalid email");

    assert!(matches!(err, LeadSubmissionError::Validation(_)));
    assert!(gateway.sent().is_empty());
    assert_eq!(
        session.errors().get(LeadField::Email),
        Some(ValidationError::Format)
    );
}

#[tokio::test]
async fn failed_submit_is_not_retried_automatically() {
    let gateway = UnreachableGateway::default();
    let mut session = LeadFormSession::new(filled_form());

    assert!(session.submit(&gateway).await.is_err());
    assert_eq!(gateway.attempts(), 1);

    // a manual retry is allowed once the first attempt has finished
    assert!(session.submit(&gateway).await.is_err());
    assert_eq!(gateway.attempts(), 2);
    assert_eq!(session.form(), &filled_form());
}

#[tokio::test]
async fn dropped_submit_releases_in_flight_guard() {
    let stalled = StalledGateway::default();
    let mut session = LeadFormSession::new(filled_form());

    let timed_out =
        tokio::time::timeout(Duration::from_millis(20), session.submit(&stalled)).await;
    assert!(timed_out.is_err());
    assert_eq!(stalled.attempts(), 1);

    assert_eq!(session.status(), SubmissionStatus::Idle);
    assert_eq!(session.banner(), None);
    assert_eq!(session.form(), &filled_form());

    let gateway = RecordingGateway::default();
    session.submit(&gateway).await.expect("resubmitted");
    assert_eq!(gateway.sent().len(), 1);
    assert_eq!(session.status(), SubmissionStatus::Succeeded);
}

#[test]
fn abandon_submit_only_applies_while_in_flight() {
    let mut session = LeadFormSession::new(filled_form());
    assert!(!session.abandon_submit());

    session.begin_submit().expect("valid form");
    assert!(session.abandon_submit());
    assert!(!session.is_submitting());
    assert!(session.begin_submit().is_ok());
}
