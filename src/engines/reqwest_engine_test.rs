// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use crate::engines::reqwest_engine::{ReqwestEngine, DEFAULT_USER_AGENT};
    use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn engine() -> ReqwestEngine {
        ReqwestEngine::new(DEFAULT_USER_AGENT).unwrap()
    }

    #[tokio::test]
    async fn test_reqwest_engine_basic_scraping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clinic"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>Test content</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let request = ScrapeRequest::new(format!("{}/clinic", server.uri()), Duration::from_secs(5));
        let response = engine().scrape(&request).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert!(response.content.contains("Test content"));
        assert_eq!(response.content_type, "text/html");
        assert_eq!(engine().name(), "reqwest");
    }

    #[tokio::test]
    async fn test_reqwest_engine_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let request = ScrapeRequest::new(format!("{}/error", server.uri()), Duration::from_secs(5));
        let err = engine().scrape(&request).await.unwrap_err();

        assert!(matches!(err, EngineError::HttpStatus(503)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_reqwest_engine_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let request = ScrapeRequest::new(server.uri(), Duration::from_millis(100));
        let err = engine().scrape(&request).await.unwrap_err();

        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_reqwest_engine_rejects_non_http() {
        let request = ScrapeRequest::new("ftp://files.example.com", Duration::from_secs(1));
        let err = engine().scrape(&request).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidUrl(_)));
        assert!(!err.is_retryable());
    }
}
