// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::application::dto::tool_request::{
    AnalyzeRequestDto, AnalyzeResponseDto, ClassifyRequestDto, ComplianceCheckRequestDto,
    ValidateUrlsRequestDto,
};
use crate::domain::services::industry_classifier::classify_industry;
use crate::domain::services::url_validator::{check_url, validate_urls};
use crate::presentation::errors::{validate_request, AppError};
use crate::utils::url_utils::ensure_scheme;
use axum::{response::IntoResponse, Extension, Json};
use chrono::Utc;
use serde_json::json;

/// 同步分析单个机构
pub async fn analyze(
    Extension(ctx): Extension<AppContext>,
    Json(request): Json<AnalyzeRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;

    let facility = match (request.url.as_deref(), request.facility_data) {
        (Some(raw), _) => {
            let url = ensure_scheme(raw);
            check_url(&url).map_err(|reason| AppError::bad_request(format!("{}: {}", reason, raw)))?;
            ctx.scrape_facility(&url).await?
        }
        (None, Some(facility)) => facility,
        (None, None) => return Err(AppError::bad_request("url or facility_data is required")),
    };

    let analysis = ctx.analysis.analyze_facility(&facility).await;
    let script = if request.include_script {
        Some(ctx.analysis.generate_call_script(&analysis).await)
    } else {
        None
    };

    Ok(Json(AnalyzeResponseDto {
        success: true,
        facility,
        analysis,
        script,
    }))
}

/// 校验换行分隔的URL文本块
pub async fn validate_url_list(
    Json(request): Json<ValidateUrlsRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let report = validate_urls(&request.text);
    Ok(Json(json!({ "success": true, "result": report })))
}

pub async fn classify(
    Json(request): Json<ClassifyRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let classification = classify_industry(&request.text);
    Ok(Json(json!({ "success": true, "classification": classification })))
}

/// 呼叫前检查：格式、禁呼名单与合规结论
pub async fn compliance_check(
    Extension(ctx): Extension<AppContext>,
    Json(request): Json<ComplianceCheckRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let (issues, compliance) = ctx.calls.screen(&request.phone_number, Utc::now());
    Ok(Json(json!({
        "success": true,
        "can_call": issues.is_empty(),
        "issues": issues,
        "compliance": compliance,
    })))
}
