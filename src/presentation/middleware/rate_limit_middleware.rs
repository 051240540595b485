// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::services::rate_limiting_service::{RateLimitResult, RateLimitingService};
use crate::presentation::middleware::auth_middleware::AuthUser;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// 限流状态
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<dyn RateLimitingService>,
    pub enabled: bool,
}

/// 速率限制中间件
///
/// 须位于认证中间件之后；按认证用户计数，超限时返回 429 和 `Retry-After`
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.enabled {
        return next.run(req).await;
    }
    let Some(auth) = req.extensions().get::<AuthUser>().copied() else {
        return next.run(req).await;
    };

    match state.limiter.check_rate_limit(auth.user_id).await {
        RateLimitResult::Allowed => next.run(req).await,
        RateLimitResult::RetryAfter {
            retry_after_seconds,
        } => {
            warn!(user_id = %auth.user_id, "Rate limit exceeded");
            counter!("http_requests_throttled_total").increment(1);

            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "success": false,
                    "error": "Too many requests",
                    "retry_after_seconds": retry_after_seconds,
                })),
            )
                .into_response();
            if let Ok(value) = HeaderValue::from_str(&retry_after_seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
