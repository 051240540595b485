// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::application::dto::api_key_request::CreateApiKeyRequestDto;
use crate::domain::models::api_key::ApiKey;
use crate::presentation::errors::{validate_request, AppError};
use crate::presentation::middleware::auth_middleware::AuthUser;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// 创建API密钥
///
/// 明文密钥只在此响应中返回一次
pub async fn create_api_key(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateApiKeyRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let (key, raw) = ApiKey::generate(auth.user_id, request.name, request.expires_in_days);
    let key = ctx.api_keys.create(&key).await?;
    info!(prefix = %key.prefix, "API key created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "api_key": key, "key": raw })),
    ))
}

pub async fn list_api_keys(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let keys = ctx.api_keys.find_by_user(auth.user_id).await?;
    Ok(Json(json!({ "success": true, "api_keys": keys })))
}

pub async fn revoke_api_key(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !ctx.api_keys.delete(auth.user_id, id).await? {
        return Err(AppError::not_found(format!("api key {}", id)));
    }
    info!(key_id = %id, "API key revoked");
    Ok(Json(json!({ "success": true })))
}
