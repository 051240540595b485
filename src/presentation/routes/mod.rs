// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::presentation::handlers::{
    api_key_handler, call_handler, job_handler, notification_handler, tool_handler,
    webhook_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::presentation::middleware::rate_limit_middleware::{
    rate_limit_middleware, RateLimitState,
};
use axum::{
    middleware,
    routing::{delete, get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// `/health` 与 `/v1/version` 公开，其余接口需要 Bearer API密钥
pub fn routes(ctx: AppContext) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let auth_state = AuthState {
        api_keys: ctx.api_keys.clone(),
    };
    let rate_limit_state = RateLimitState {
        limiter: ctx.rate_limiter.clone(),
        enabled: ctx.settings.rate_limiting.enabled,
    };

    let protected_routes = Router::new()
        .route(
            "/v1/jobs",
            post(job_handler::create_job).get(job_handler::list_jobs),
        )
        .route("/v1/jobs/bulk", post(job_handler::create_bulk_job))
        .route(
            "/v1/jobs/{id}",
            get(job_handler::get_job).delete(job_handler::delete_job),
        )
        .route("/v1/analyze", post(tool_handler::analyze))
        .route("/v1/urls/validate", post(tool_handler::validate_url_list))
        .route("/v1/industry/classify", post(tool_handler::classify))
        .route("/v1/compliance/check", post(tool_handler::compliance_check))
        .route(
            "/v1/calls",
            post(call_handler::trigger_call).get(call_handler::call_history),
        )
        .route("/v1/calls/statistics", get(call_handler::call_statistics))
        .route(
            "/v1/webhooks",
            post(webhook_handler::create_webhook).get(webhook_handler::list_webhooks),
        )
        .route("/v1/webhooks/{id}", delete(webhook_handler::delete_webhook))
        .route(
            "/v1/notifications",
            get(notification_handler::list_notifications),
        )
        .route(
            "/v1/notifications/{id}/read",
            post(notification_handler::mark_read),
        )
        .route(
            "/v1/api-keys",
            post(api_key_handler::create_api_key).get(api_key_handler::list_api_keys),
        )
        .route("/v1/api-keys/{id}", delete(api_key_handler::revoke_api_key))
        .route_layer(middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(ctx))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
