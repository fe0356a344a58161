use std::net::SocketAddr;
use std::time::Duration;
use std::sync::Arc;

use fraudshield::api::{create_router, AppState};
use fraudshield::{RuleSet, Variant};
use serde_json::{json, Value};

async fn spawn_server(variants: &[Variant]) -> SocketAddr {
    let state = Arc::new(AppState::new(
        RuleSet::new(variants),
        Duration::from_millis(100),
    ));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_evaluate_over_http() {
    let addr = spawn_server(&Variant::ALL).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/evaluate"))
        .json(&json!({
            "transaction_id": "tx-http-1",
            "amount": 60000.0,
            "user_id": "U1",
            "risk_score": 0.2
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/json"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "transaction_id": "tx-http-1",
            "action": "MANUAL_REVIEW",
            "reason": "High transaction amount"
        })
    );
}

#[tokio::test]
async fn test_rule_over_http() {
    let addr = spawn_server(&Variant::ALL).await;
    let client = reqwest::Client::new();

    for (amount, is_fraud, reason) in [
        (6000.0, true, "amount_threshold"),
        (-5.0, true, "invalid_amount"),
        (100.0, false, "ok"),
    ] {
        let body: Value = client
            .post(format!("http://{addr}/rule"))
            .json(&json!({
                "transaction_id": "tx-http-2",
                "amount": amount,
                "card_id": "C1"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["transaction_id"], "tx-http-2");
        assert_eq!(body["is_fraud"], is_fraud);
        assert_eq!(body["reason"], reason);
    }
}

#[tokio::test]
async fn test_malformed_bodies_over_http() {
    let addr = spawn_server(&Variant::ALL).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("http://{addr}/evaluate"))
        .body("{broken")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());

    let response = client
        .post(format!("http://{addr}/rule"))
        .body("{broken")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(response.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert!(!response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_evaluations_are_independent() {
    let addr = spawn_server(&[Variant::FraudFlag]).await;
    let client = reqwest::Client::new();

    let mut handles = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let amount = if i % 2 == 0 { 10_000.0 } else { 10.0 };
            let body: Value = client
                .post(format!("http://{addr}/rule"))
                .json(&json!({
                    "transaction_id": format!("tx-{i}"),
                    "amount": amount,
                    "card_id": "C1"
                }))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            (i, body)
        }));
    }

    for handle in handles {
        let (i, body) = handle.await.unwrap();
        assert_eq!(body["transaction_id"], format!("tx-{i}"));
        assert_eq!(body["is_fraud"], i % 2 == 0);
    }
}
