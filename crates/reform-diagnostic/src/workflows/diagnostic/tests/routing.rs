use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializable")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn questions_route_lists_the_bank() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .oneshot(get("/api/v1/health-check/questions"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["questions"][1]["options"][0]["score"], 3);
    assert_eq!(body["max_score"], 15);
}

#[tokio::test]
async fn score_route_reports_progress_until_complete() {
    let (router, _) = router_with_recording_gateway();

    let partial = json!({ "answers": [
        { "question_id": 1, "option_index": 0 },
        { "question_id": 2, "option_index": 0 }
    ]});
    let response = router
        .clone()
        .oneshot(post_json("/api/v1/health-check/score", partial))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["progress"], json!({ "answered": 2, "total": 6 }));
    assert!(body.get("result").is_none());

    let every_first_option: Vec<Value> = (1..=6)
        .map(|id| json!({ "question_id": id, "option_index": 0 }))
        .collect();
    let complete = json!({ "answers": every_first_option });
    let response = router
        .oneshot(post_json("/api/v1/health-check/score", complete))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["result"]["total_score"], 15);
    assert_eq!(body["result"]["category"], "danger");
    assert_eq!(body["result"]["label"], "危険");
}

#[tokio::test]
async fn score_route_rejects_unknown_option() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .oneshot(post_json(
            "/api/v1/health-check/score",
            json!({ "answers": [{ "question_id": 3, "option_index": 5 }] }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn evaluation_route_applies_incentive_formula() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/simulators/evaluation",
            json!({ "challenge_count": 5 }),
        ))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["evaluation_score"], 13);
    assert_eq!(body["company_profit"], 250_000);

    let response = router
        .oneshot(post_json(
            "/api/v1/simulators/evaluation",
            json!({ "challenge_count": 21 }),
        ))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pay_rule_route_returns_comparison() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .clone()
        .oneshot(get("/api/v1/simulators/pay-rules/outcome_sharing"))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["employees"][1]["total_pay"], 280_000);

    let response = router
        .oneshot(get("/api/v1/simulators/pay-rules/piecework"))
        .await
        .expect("route responds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roi_route_reports_payback_or_not_recoverable() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/simulators/roi",
            json!({ "employee_count": 10, "waste_minutes_per_day": 30, "hourly_wage": 1500 }),
        ))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["annual_loss"], 1_875_000);
    assert_eq!(body["payback"], json!({ "status": "days", "days": 15 }));

    let response = router
        .oneshot(post_json(
            "/api/v1/simulators/roi",
            json!({ "employee_count": 1, "waste_minutes_per_day": 5, "hourly_wage": 1000 }),
        ))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["payback"], json!({ "status": "not_recoverable" }));
}

#[tokio::test]
async fn roi_route_rejects_unrepresentable_losses() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .oneshot(post_json(
            "/api/v1/simulators/roi",
            json!({ "employee_count": 1000, "waste_minutes_per_day": 60, "hourly_wage": 1e18 }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wizard_route_applies_events_to_client_state() {
    let (router, _) = router_with_recording_gateway();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/wizard/transition",
            json!({ "event": { "type": "next" } }),
        ))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["state"]["active_step"], 2);
    assert_eq!(body["effect"], json!({ "type": "scroll_to", "step": 2 }));
    assert_eq!(body["indicator"][0]["status"], "completed");

    let response = router
        .oneshot(post_json(
            "/api/v1/wizard/transition",
            json!({
                "state": { "active_step": 4, "carried_health": null },
                "event": { "type": "next" }
            }),
        ))
        .await
        .expect("route responds");
    let body = body_json(response).await;
    assert_eq!(body["state"]["active_step"], 4);
    assert!(body.get("effect").is_none());
}

#[tokio::test]
async fn lead_route_accepts_valid_form() {
    let (router, gateway) = router_with_recording_gateway();

    let response = router
        .oneshot(post_json(
            "/api/v1/leads",
            json!({
                "form": filled_form(),
                "health": { "total_score": 8, "category": "caution" }
            }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "submitted");
    assert_eq!(gateway.sent().len(), 1);
}

#[tokio::test]
async fn lead_route_returns_field_errors() {
    let (router, gateway) = router_with_recording_gateway();

    let response = router
        .oneshot(post_json(
            "/api/v1/leads",
            json!({ "form": { "company_name": "", "name": "", "email": "" } }),
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let fields = body["fields"].as_object().expect("field map");
    assert_eq!(fields.len(), 3);
    assert_eq!(body["fields"]["email"]["code"], "required");
    assert_eq!(body["fields"]["company_name"]["message"], "会社名を入力してください");
    assert!(gateway.sent().is_empty());
}

#[tokio::test]
async fn lead_handler_maps_transport_failure_to_bad_gateway() {
    use crate::workflows::diagnostic::lead::{LeadSubmissionService, FAILURE_MESSAGE};
    use crate::workflows::diagnostic::router::{lead_handler, LeadRequest};
    use axum::extract::State;
    use axum::response::IntoResponse;
    use std::sync::Arc;

    let service = Arc::new(LeadSubmissionService::new(Arc::new(
        UnreachableGateway::default(),
    )));

    let response = lead_handler::<UnreachableGateway>(
        State(service),
        axum::Json(LeadRequest {
            form: filled_form(),
            health: None,
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], FAILURE_MESSAGE);
}
