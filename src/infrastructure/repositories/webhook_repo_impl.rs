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

use crate::domain::models::webhook::Webhook;
use crate::domain::repositories::webhook_repository::WebhookRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Webhook仓库实现
#[derive(Clone, Default)]
pub struct WebhookRepoImpl {
    webhooks: Arc<DashMap<Uuid, Webhook>>,
}

impl WebhookRepoImpl {
    /// 创建新的Webhook仓库实现
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookRepository for WebhookRepoImpl {
    async fn create(&self, webhook: &Webhook) -> Result<Webhook, RepositoryError> {
        self.webhooks.insert(webhook.id, webhook.clone());
        Ok(webhook.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Webhook>, RepositoryError> {
        Ok(self.webhooks.get(&id).map(|w| w.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Webhook>, RepositoryError> {
        let mut hooks: Vec<Webhook> = self
            .webhooks
            .iter()
            .filter(|w| w.user_id == user_id)
            .map(|w| w.clone())
            .collect();
        hooks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(hooks)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self
            .webhooks
            .remove_if(&id, |_, w| w.user_id == user_id)
            .is_some())
    }
}
