// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::application::dto::call_request::{CallHistoryQueryDto, TriggerCallRequestDto};
use crate::domain::services::call_service::{CallOutcome, NOT_COMPLIANT_ERROR};
use crate::presentation::errors::{validate_request, AppError};
use crate::presentation::middleware::auth_middleware::AuthUser;
use axum::{
    extract::Query, http::StatusCode, response::IntoResponse, Extension, Json,
};
use chrono::Utc;
use serde_json::json;

/// 发起外呼
///
/// 未通过检查时返回 422 且不产生记录；服务商失败时记录为失败并返回 502
pub async fn trigger_call(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<TriggerCallRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;

    let response = match ctx
        .calls
        .trigger_call(auth.user_id, request.into(), Utc::now())
        .await?
    {
        CallOutcome::Placed { call, note } => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "call_id": call.id,
                "call": call,
                "provider": ctx.calls.provider_name(),
                "note": note,
            })),
        ),
        CallOutcome::ProviderFailed { call, error } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "success": false,
                "error": error,
                "call_id": call.id,
                "call": call,
            })),
        ),
        CallOutcome::Rejected { issues, compliance } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "success": false,
                "error": NOT_COMPLIANT_ERROR,
                "compliance_issues": issues,
                "compliance": compliance,
            })),
        ),
    };
    Ok(response)
}

pub async fn call_history(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<CallHistoryQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let calls = ctx
        .calls
        .history(auth.user_id, query.facility_name.as_deref())
        .await?;
    Ok(Json(json!({ "success": true, "count": calls.len(), "calls": calls })))
}

pub async fn call_statistics(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let statistics = ctx.calls.statistics(auth.user_id).await?;
    Ok(Json(json!({ "success": true, "statistics": statistics })))
}
