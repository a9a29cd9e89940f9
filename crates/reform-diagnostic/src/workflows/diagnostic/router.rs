use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::health_check::{
    max_total_score, question_bank, AnswerSelection, AnswerSet, DiagnosticResult,
    DiagnosticResultView, HealthCheckProgress, Question,
};
use super::lead::{LeadForm, LeadGateway, LeadSubmissionService};
use super::simulators::{
    simulate_incentive, simulate_roi, ChallengeCount, IncentiveOutcome, PayRule,
    PayRuleComparison, RoiInput, RoiOutcome,
};
use super::wizard::{StepIndicator, WizardEffect, WizardEvent, WizardState};
use super::DiagnosticError;
use crate::error::AppError;

/// Router builder exposing the diagnostic steps as JSON endpoints.
pub fn diagnostic_router<G>(service: Arc<LeadSubmissionService<G>>) -> Router
where
    G: LeadGateway + 'static,
{
    Router::new()
        .route("/api/v1/health-check/questions", get(questions_handler))
        .route("/api/v1/health-check/score", post(score_handler))
        .route("/api/v1/simulators/evaluation", post(evaluation_handler))
        .route("/api/v1/simulators/pay-rules/:rule", get(pay_rule_handler))
        .route("/api/v1/simulators/roi", post(roi_handler))
        .route("/api/v1/wizard/transition", post(wizard_handler))
        .route("/api/v1/leads", post(lead_handler::<G>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionsResponse {
    pub(crate) questions: &'static [Question],
    pub(crate) max_score: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) answers: Vec<AnswerSelection>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    pub(crate) progress: HealthCheckProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<DiagnosticResultView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluationRequest {
    pub(crate) challenge_count: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WizardRequest {
    #[serde(default)]
    pub(crate) state: WizardState,
    pub(crate) event: WizardEvent,
}

#[derive(Debug, Serialize)]
pub(crate) struct WizardResponse {
    pub(crate) state: WizardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) effect: Option<WizardEffect>,
    pub(crate) indicator: Vec<StepIndicator>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LeadRequest {
    pub(crate) form: LeadForm,
    #[serde(default)]
    pub(crate) health: Option<DiagnosticResult>,
}

pub(crate) async fn questions_handler() -> Json<QuestionsResponse> {
    Json(QuestionsResponse {
        questions: question_bank(),
        max_score: max_total_score(),
    })
}

pub(crate) async fn score_handler(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let answers = AnswerSet::from_selections(request.answers).map_err(DiagnosticError::from)?;

    Ok(Json(ScoreResponse {
        progress: answers.progress(),
        result: answers.result().map(|result| result.view()),
    }))
}

pub(crate) async fn evaluation_handler(
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<IncentiveOutcome>, AppError> {
    let challenges = ChallengeCount::new(request.challenge_count).map_err(DiagnosticError::from)?;
    Ok(Json(simulate_incentive(challenges)))
}

pub(crate) async fn pay_rule_handler(
    Path(rule): Path<String>,
) -> Result<Json<PayRuleComparison>, AppError> {
    let rule: PayRule = rule.parse().map_err(DiagnosticError::from)?;
    Ok(Json(rule.compare()))
}

pub(crate) async fn roi_handler(
    Json(input): Json<RoiInput>,
) -> Result<Json<RoiOutcome>, AppError> {
    let outcome = simulate_roi(&input).map_err(DiagnosticError::from)?;
    Ok(Json(outcome))
}

pub(crate) async fn wizard_handler(Json(request): Json<WizardRequest>) -> Json<WizardResponse> {
    let transition = request.state.transition(request.event);

    Json(WizardResponse {
        indicator: transition.state.indicator(),
        state: transition.state,
        effect: transition.effect,
    })
}

pub(crate) async fn lead_handler<G>(
    State(service): State<Arc<LeadSubmissionService<G>>>,
    Json(request): Json<LeadRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError>
where
    G: LeadGateway + 'static,
{
    let receipt = service
        .submit(&request.form, request.health)
        .await
        .map_err(DiagnosticError::from)?;

    let payload = json!({
        "status": "submitted",
        "message": receipt.message,
        "dispatched_at": receipt.dispatched_at,
    });
    Ok((StatusCode::ACCEPTED, Json(payload)))
}
