use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use reform_diagnostic::config::LeadConfig;
use reform_diagnostic::workflows::diagnostic::{
    HttpLeadGateway, LeadGateway, LeadPayload, TransportError,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Debug, Default)]
struct Captured {
    requests: Mutex<Vec<(Option<String>, Value)>>,
}

async fn capture(
    State(captured): State<Arc<Captured>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    captured
        .requests
        .lock()
        .expect("capture mutex poisoned")
        .push((content_type, body));
    // The gateway must not care what the endpoint answers.
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn spawn_endpoint() -> (SocketAddr, Arc<Captured>) {
    let captured = Arc::new(Captured::default());
    let app = Router::new()
        .route("/exec", post(capture))
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test endpoint runs");
    });
    (addr, captured)
}

fn payload() -> LeadPayload {
    LeadPayload {
        company: "株式会社さくら工務店".to_string(),
        name: "山田 太郎".to_string(),
        email: "taro@sakura-koumuten.jp".to_string(),
        message: "".to_string(),
    }
}

#[tokio::test]
async fn posts_json_body_once_and_ignores_response_status() {
    let (addr, captured) = spawn_endpoint().await;
    let config = LeadConfig::new(format!("http://{addr}/exec")).expect("valid endpoint");
    let gateway = HttpLeadGateway::new(&config);

    gateway
        .submit_lead(&payload())
        .await
        .expect("a delivered request counts as dispatched");

    let requests = captured.requests.lock().expect("capture mutex poisoned");
    assert_eq!(requests.len(), 1);
    let (content_type, body) = &requests[0];
    assert!(content_type
        .as_deref()
        .is_some_and(|value| value.starts_with("application/json")));
    assert_eq!(
        body,
        &json!({
            "company": "株式会社さくら工務店",
            "name": "山田 太郎",
            "email": "taro@sakura-koumuten.jp",
            "message": "",
        })
    );
}

#[tokio::test]
async fn closed_port_is_reported_as_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let gateway = HttpLeadGateway::with_client(reqwest::Client::new(), format!("http://{addr}/exec"));
    let err = gateway
        .submit_lead(&payload())
        .await
        .expect_err("nothing listens on the port");

    assert!(matches!(err, TransportError::Unreachable(_)));
}
