// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with};
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_and_version_are_public() {
    let app = create_test_app().await;

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    health.assert_text("OK");

    let version = app.server.get("/v1/version").await;
    version.assert_status_ok();
    version.assert_text(env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_protected_routes_require_valid_key() {
    let app = create_test_app().await;

    app.server
        .get("/v1/jobs")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/v1/jobs")
        .authorization_bearer("sk_not_a_real_key")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_requests_are_rate_limited_per_user() {
    let app = create_test_app_with(|settings| settings.rate_limiting.default_rpm = 2).await;

    for _ in 0..2 {
        app.server
            .get("/v1/webhooks")
            .authorization_bearer(&app.api_key)
            .await
            .assert_status_ok();
    }
    let throttled = app
        .server
        .get("/v1/webhooks")
        .authorization_bearer(&app.api_key)
        .await;
    throttled.assert_status(StatusCode::TOO_MANY_REQUESTS);
    assert!(throttled.headers().contains_key("retry-after"));

    let other_key = app.key_for_other_user().await;
    app.server
        .get("/v1/webhooks")
        .authorization_bearer(&other_key)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_api_key_lifecycle() {
    let app = create_test_app().await;

    let created = app
        .server
        .post("/v1/api-keys")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "name": "ci", "expires_in_days": 30 }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let body: Value = created.json();
    let raw = body["key"].as_str().unwrap().to_string();
    let key_id = body["api_key"]["id"].as_str().unwrap().to_string();
    assert!(body["api_key"].get("key_hash").is_none());

    app.server
        .get("/v1/notifications")
        .authorization_bearer(&raw)
        .await
        .assert_status_ok();

    let listed: Value = app
        .server
        .get("/v1/api-keys")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(listed["api_keys"].as_array().unwrap().len(), 2);

    app.server
        .delete(&format!("/v1/api-keys/{}", key_id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status_ok();
    app.server
        .get("/v1/notifications")
        .authorization_bearer(&raw)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .delete(&format!("/v1/api-keys/{}", key_id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_key_name_is_validated() {
    let app = create_test_app().await;

    app.server
        .post("/v1/api-keys")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "name": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_urls_tool() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/urls/validate")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "text": "https://a.example.com\n\nHTTPS://A.EXAMPLE.COM\nftp://files.example.com\nhttps://b.example.com"
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let result = &body["result"];
    assert_eq!(result["total"], 4);
    assert_eq!(result["valid"].as_array().unwrap().len(), 2);
    assert_eq!(result["invalid"].as_array().unwrap().len(), 1);
    assert_eq!(result["duplicates"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_classify_tool() {
    let app = create_test_app().await;

    let body: Value = app
        .server
        .post("/v1/industry/classify")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "text": "Our clinic doctors treat every patient. Medical care, dental care and a pharmacy on site."
        }))
        .await
        .json();
    assert_eq!(body["success"], true);
    assert_eq!(body["classification"]["industry"], "healthcare");

    app.server
        .post("/v1/industry/classify")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "text": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compliance_check_tool() {
    let app = create_test_app().await;

    let body: Value = app
        .server
        .post("/v1/compliance/check")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "phone_number": "555-0100" }))
        .await
        .json();
    assert_eq!(body["can_call"], false);
    assert!(body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .any(|issue| issue == "Invalid phone number format"));
}

#[tokio::test]
async fn test_analyze_tool_with_facility_data() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/analyze")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "facility_data": {
                "url": "https://clinic.example.com",
                "facility_name": "Community Health Clinic",
                "phone": ["(555) 123-4567"]
            },
            "include_script": true
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["analysis"]["facility_name"], "Community Health Clinic");
    assert!(body["analysis"]["lead_score"].as_u64().unwrap() >= 60);
    assert!(body["script"].as_str().is_some());

    app.server
        .post("/v1/analyze")
        .authorization_bearer(&app.api_key)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
