// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLINIC_PAGE: &str = r#"<html>
<head><title>Lakeside Family Clinic</title><meta name="viewport" content="width=device-width"></head>
<body>
  <h1>Lakeside Family Clinic</h1>
  <address>42 Shore Rd, Chicago, IL</address>
  <p>Our clinic doctors care for every patient. Medical and dental care, pharmacy on site.</p>
  <p>Call (312) 555-0199 to book an appointment. We accept insurance and Medicare.</p>
</body>
</html>"#;

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/clinic"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(CLINIC_PAGE, "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_scrape_job_completes() {
    let app = create_test_app().await;
    let pages = page_server().await;

    let created = app
        .server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": format!("{}/clinic", pages.uri()), "extraction_mode": "ai" }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let job_id = created.json::<Value>()["job"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let body: Value = app
        .server
        .get(&format!("/v1/jobs/{}", job_id))
        .add_query_param("wait", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    let job = &body["job"];
    assert_eq!(job["status"], "completed");
    assert_eq!(job["result"]["facility"]["facility_name"], "Lakeside Family Clinic");
    assert_eq!(job["result"]["facility"]["phone"][0], "(312) 555-0199");
    assert_eq!(job["result"]["industry"]["industry"], "healthcare");
    assert!(job["result"]["analysis"]["lead_score"].as_u64().unwrap() >= 70);

    let notifications: Value = app
        .server
        .get("/v1/notifications")
        .add_query_param("unread", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    let list = notifications["notifications"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Scrape job completed");

    let id = list[0]["id"].as_str().unwrap();
    app.server
        .post(&format!("/v1/notifications/{}/read", id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status_ok();
    let unread: Value = app
        .server
        .get("/v1/notifications")
        .add_query_param("unread", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert!(unread["notifications"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_scrape_job_records_fetch_failure() {
    let app = create_test_app().await;
    let pages = page_server().await;

    let created: Value = app
        .server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": format!("{}/broken", pages.uri()) }))
        .await
        .json();
    let job_id = created["job"]["id"].as_str().unwrap();

    let body: Value = app
        .server
        .get(&format!("/v1/jobs/{}", job_id))
        .add_query_param("wait", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(body["job"]["status"], "failed");
    assert!(body["job"]["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_invalid_scrape_url_is_rejected() {
    let app = create_test_app().await;

    app.server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": "ftp://files.example.com" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    app.server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_job_reports_validation_and_partial_failures() {
    let app = create_test_app().await;
    let pages = page_server().await;

    let text = format!(
        "{base}/clinic\nnot a url\n{base}/broken\n{base}/clinic\n",
        base = pages.uri()
    );
    let created = app
        .server
        .post("/v1/jobs/bulk")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "text": text }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    assert_eq!(created["validation"]["total"], 4);
    assert_eq!(created["validation"]["valid"].as_array().unwrap().len(), 2);
    assert_eq!(created["validation"]["duplicates"][0]["count"], 2);

    let job_id = created["job"]["id"].as_str().unwrap();
    let body: Value = app
        .server
        .get(&format!("/v1/jobs/{}", job_id))
        .add_query_param("wait", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    let result = &body["job"]["result"];
    assert_eq!(body["job"]["status"], "completed");
    assert_eq!(result["total"], 2);
    assert_eq!(result["succeeded"], 1);
    assert_eq!(result["failed"], 1);
    assert!(result["results"][1]["error"].as_str().unwrap().contains("500"));
    assert!(result.get("leads").is_none());

    app.server
        .post("/v1/jobs/bulk")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "text": "nothing\nvalid here" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analysis_job_ranks_leads() {
    let app = create_test_app().await;

    let created: Value = app
        .server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({
            "job_type": "analysis",
            "facility_data": [
                { "url": "https://a.example.com", "facility_name": "Sparse Clinic" },
                {
                    "url": "https://b.example.com",
                    "facility_name": "Busy Clinic",
                    "phone": ["(212) 555-0100"],
                    "address": "1 Main St",
                    "services": ["Primary Care"]
                }
            ]
        }))
        .await
        .json();
    let job_id = created["job"]["id"].as_str().unwrap();

    let body: Value = app
        .server
        .get(&format!("/v1/jobs/{}", job_id))
        .add_query_param("wait", "true")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    let leads = body["job"]["result"]["leads"].as_array().unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["facility_name"], "Busy Clinic");
    assert_eq!(leads[0]["rank"], 1);
}

#[tokio::test]
async fn test_jobs_are_owner_scoped_and_deletable() {
    let app = create_test_app().await;
    let pages = page_server().await;
    let other_key = app.key_for_other_user().await;

    let created: Value = app
        .server
        .post("/v1/jobs")
        .authorization_bearer(&app.api_key)
        .json(&json!({ "url": format!("{}/clinic", pages.uri()), "recurrence": "daily" }))
        .await
        .json();
    let job_id = created["job"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["job"]["recurrence"], "daily");

    app.server
        .get(&format!("/v1/jobs/{}", job_id))
        .authorization_bearer(&other_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    let others: Value = app
        .server
        .get("/v1/jobs")
        .authorization_bearer(&other_key)
        .await
        .json();
    assert!(others["jobs"].as_array().unwrap().is_empty());

    let mine: Value = app
        .server
        .get("/v1/jobs")
        .add_query_param("limit", "10")
        .authorization_bearer(&app.api_key)
        .await
        .json();
    assert_eq!(mine["jobs"].as_array().unwrap().len(), 1);

    app.server
        .delete(&format!("/v1/jobs/{}", job_id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status_ok();
    app.server
        .get(&format!("/v1/jobs/{}", job_id))
        .authorization_bearer(&app.api_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
