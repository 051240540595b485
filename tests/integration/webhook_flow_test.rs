// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use scrapex::infrastructure::services::webhook_service_impl::{
    WebhookServiceImpl, EVENT_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use scrapex::workers::webhook_worker::WebhookWorker;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_webhook_registration_validation() {
    let app = create_test_app().await;

    app.server
        .post("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": "ftp://hooks.example.com", "events": ["job.completed"] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": "https://hooks.example.com", "events": [] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": "https://hooks.example.com", "events": ["order.shipped"] }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_webhook_lifecycle() {
    let app = create_test_app().await;

    let created = app
        .server
        .post("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": "https://hooks.example.com/scrapex", "events": ["job.completed", "call.completed"] }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    assert_eq!(body["secret"].as_str().unwrap().len(), 64);
    assert!(body["webhook"].get("secret").is_none());
    let id = body["webhook"]["id"].as_str().unwrap().to_string();

    let listed: Value = app
        .server
        .get("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(listed["webhooks"].as_array().unwrap().len(), 1);

    app.server
        .delete(&format!("/v1/webhooks/{}", id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status_ok();
    app.server
        .delete(&format!("/v1/webhooks/{}", id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_job_completion_is_delivered_signed() {
    let app = create_test_app().await;
    let receiver = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clinic"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Bay Clinic</title></head><body><h1>Bay Clinic</h1></body></html>",
        ))
        .mount(&receiver)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(header(EVENT_HEADER, "job.completed"))
        .and(header_exists(SIGNATURE_HEADER))
        .and(header_exists(TIMESTAMP_HEADER))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&receiver)
        .await;

    app.server
        .post("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "url": format!("{}/hook", receiver.uri()),
            "events": ["job.completed"],
            "secret": "whsec_integration_secret_0001"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let created: Value = app
        .server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": format!("{}/clinic", receiver.uri()) }))
        .await
        .json();
    let job_id = created["job"]["id"].as_str().unwrap().to_string();

    let worker = WebhookWorker::new(
        app.ctx.webhook_events.clone(),
        app.ctx.webhooks.clone(),
        Arc::new(WebhookServiceImpl::new(Duration::from_secs(5)).unwrap()),
        Duration::from_secs(1),
        10,
    );
    let mut delivered = 0;
    for _ in 0..100 {
        delivered = worker.process_pending_webhooks().await.unwrap();
        if delivered > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(delivered, 1);

    let requests = receiver.received_requests().await.unwrap();
    let hook = requests
        .iter()
        .find(|r| r.url.path() == "/hook")
        .expect("webhook delivered");
    let payload: Value = serde_json::from_slice(&hook.body).unwrap();
    assert_eq!(payload["event"], "job.completed");
    assert_eq!(payload["data"]["job_id"], job_id.as_str());
}
