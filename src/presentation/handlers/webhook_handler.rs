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

use crate::application::context::AppContext;
use crate::application::dto::webhook_request::CreateWebhookRequestDto;
use crate::domain::models::webhook::Webhook;
use crate::presentation::errors::{validate_request, AppError};
use crate::presentation::middleware::auth_middleware::AuthUser;
use crate::utils::url_utils::is_http_url;
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Extension, Json};
use rand::RngCore;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// 注册Webhook
///
/// 签名密钥只在此响应中返回一次
pub async fn create_webhook(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateWebhookRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    if !is_http_url(&request.url) {
        return Err(AppError::bad_request("Webhook URL must use http or https"));
    }

    let mut events = Vec::with_capacity(request.events.len());
    for event in request.events {
        if !events.contains(&event) {
            events.push(event);
        }
    }
    let secret = request.secret.unwrap_or_else(generate_secret);
    let webhook = ctx
        .webhooks
        .create(&Webhook::new(auth.user_id, request.url, events, secret.clone()))
        .await?;
    info!(webhook_id = %webhook.id, "Webhook registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "webhook": webhook, "secret": secret })),
    ))
}

pub async fn list_webhooks(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, AppError> {
    let webhooks = ctx.webhooks.find_by_user(auth.user_id).await?;
    Ok(Json(json!({ "success": true, "webhooks": webhooks })))
}

pub async fn delete_webhook(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !ctx.webhooks.delete(auth.user_id, id).await? {
        return Err(AppError::not_found(format!("webhook {}", id)));
    }
    Ok(Json(json!({ "success": true })))
}
