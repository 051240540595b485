// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::application::dto::notification_query::NotificationQueryDto;
use crate::presentation::errors::AppError;
use crate::presentation::middleware::auth_middleware::AuthUser;
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;

pub async fn list_notifications(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<NotificationQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = ctx
        .notifications
        .find_by_user(auth.user_id, query.unread)
        .await?;
    Ok(Json(json!({ "success": true, "notifications": notifications })))
}

pub async fn mark_read(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let notification = ctx.notifications.mark_read(auth.user_id, id).await?;
    Ok(Json(json!({ "success": true, "notification": notification })))
}
