// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{json, Value};

const NEW_YORK_PHONE: &str = "(212) 555-0100";

#[tokio::test]
async fn test_invalid_number_is_rejected_without_record() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/calls")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "facility_name": "Harbor Clinic", "phone_number": "555-0100" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Call not compliant with regulations");
    assert_eq!(body["compliance_issues"][0], "Invalid phone number format");

    let history: Value = app
        .server
        .get("/v1/calls")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(history["count"], 0);
}

#[tokio::test]
async fn test_do_not_call_list_blocks_number() {
    let app = create_test_app_with(|settings| {
        settings.compliance.do_not_call = vec!["+1 212 555 0100".to_string()];
    })
    .await;

    let body: Value = app
        .server
        .post("/v1/compliance/check")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "phone_number": NEW_YORK_PHONE }))
        .await
        .json();
    assert_eq!(body["can_call"], false);
    assert!(body["issues"]
        .as_array()
        .unwrap()
        .iter()
        .any(|issue| issue == "Number is on Do Not Call list"));

    app.server
        .post("/v1/calls")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "facility_name": "Harbor Clinic", "phone_number": NEW_YORK_PHONE }))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_call_follows_compliance_verdict() {
    let app = create_test_app().await;
    // the verdict depends on the current time in New York
    let (issues, _) = app.ctx.calls.screen(NEW_YORK_PHONE, Utc::now());

    let response = app
        .server
        .post("/v1/calls")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "facility_name": "Harbor Clinic",
            "phone_number": NEW_YORK_PHONE,
            "script": "Hello from the integration suite"
        }))
        .await;

    let statistics: Value;
    if issues.is_empty() {
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["provider"], "simulated");
        assert_eq!(body["call"]["status"], "completed");
        assert_eq!(body["call"]["outcome"], "interested");

        statistics = app
            .server
            .get("/v1/calls/statistics")
            .authorization_bearer(&app.api_key)
            .await
            .json();
        assert_eq!(statistics["statistics"]["total_calls"], 1);
        assert_eq!(statistics["statistics"]["completed_calls"], 1);
    } else {
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        statistics = app
            .server
            .get("/v1/calls/statistics")
            .authorization_bearer(&app.api_key)
            .await
            .json();
        assert_eq!(statistics["statistics"]["total_calls"], 0);
    }

    let filtered: Value = app
        .server
        .get("/v1/calls")
        .add_query_param("facility_name", "Someone Else")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(filtered["count"], 0);
}
