// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::Notification;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 通知仓库特质
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError>;
    async fn find_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepositoryError>;
    /// 标记为已读；通知不存在或不属于该用户时返回 `NotFound`
    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<Notification, RepositoryError>;
}
