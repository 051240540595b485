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

use crate::domain::models::notification::Notification;
use crate::domain::repositories::notification_repository::NotificationRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 通知仓库实现
#[derive(Clone, Default)]
pub struct NotificationRepoImpl {
    notifications: Arc<DashMap<Uuid, Notification>>,
}

impl NotificationRepoImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepoImpl {
    async fn create(&self, notification: &Notification) -> Result<Notification, RepositoryError> {
        self.notifications
            .insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .map(|n| n.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<Notification, RepositoryError> {
        match self.notifications.get_mut(&id) {
            Some(mut entry) if entry.user_id == user_id => {
                entry.read = true;
                Ok(entry.clone())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }
}
