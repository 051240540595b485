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

use crate::domain::models::webhook::WebhookEvent;
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Webhook事件仓库实现
#[derive(Clone, Default)]
pub struct WebhookEventRepoImpl {
    events: Arc<DashMap<Uuid, WebhookEvent>>,
}

impl WebhookEventRepoImpl {
    /// 创建新的Webhook事件仓库实现
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookEventRepository for WebhookEventRepoImpl {
    async fn create(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError> {
        self.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<WebhookEvent>, RepositoryError> {
        Ok(self.events.get(&id).map(|e| e.clone()))
    }

    async fn find_ready(&self, now: DateTime<Utc>, limit: usize) -> Result<Vec<WebhookEvent>, RepositoryError> {
        let mut ready: Vec<WebhookEvent> = self
            .events
            .iter()
            .filter(|e| e.is_ready(now))
            .map(|e| e.clone())
            .collect();
        ready.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        ready.truncate(limit);
        Ok(ready)
    }

    async fn update(&self, event: &WebhookEvent) -> Result<WebhookEvent, RepositoryError> {
        match self.events.get_mut(&event.id) {
            Some(mut entry) => {
                *entry = event.clone();
                Ok(event.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}
