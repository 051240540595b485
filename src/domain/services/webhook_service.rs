// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::{WebhookEvent, WebhookEventType};
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::repositories::webhook_repository::WebhookRepository;
use crate::utils::errors::RepositoryError;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Webhook服务特质
///
/// 定义Webhook发送的核心逻辑
#[async_trait]
pub trait WebhookService: Send + Sync {
    /// 使用订阅方的密钥签名并发送事件
    ///
    /// # 返回值
    ///
    /// * `Ok(status)` - 对方返回2xx状态码
    /// * `Err(anyhow::Error)` - 网络错误或非2xx响应
    async fn send_webhook(&self, event: &WebhookEvent, secret: &str) -> Result<u16>;
}

/// Webhook事件分发器
///
/// 为订阅了该事件类型的每个活跃Webhook创建一条待投递事件
#[derive(Clone)]
pub struct WebhookDispatcher {
    webhooks: Arc<dyn WebhookRepository>,
    events: Arc<dyn WebhookEventRepository>,
    max_retries: u32,
}

impl WebhookDispatcher {
    pub fn new(
        webhooks: Arc<dyn WebhookRepository>,
        events: Arc<dyn WebhookEventRepository>,
        max_retries: u32,
    ) -> Self {
        Self {
            webhooks,
            events,
            max_retries,
        }
    }

    /// 发布事件，返回入队的投递数量
    pub async fn publish(
        &self,
        user_id: Uuid,
        event_type: WebhookEventType,
        data: Value,
    ) -> Result<usize, RepositoryError> {
        let payload = serde_json::json!({
            "event": event_type.to_string(),
            "created_at": chrono::Utc::now(),
            "data": data,
        });

        let mut queued = 0;
        for webhook in self.webhooks.find_by_user(user_id).await? {
            if !webhook.subscribes_to(event_type) {
                continue;
            }
            let event = WebhookEvent::new(&webhook, event_type, payload.clone(), self.max_retries);
            self.events.create(&event).await?;
            queued += 1;
        }

        if queued > 0 {
            debug!(%user_id, event = %event_type, queued, "Queued webhook events");
        }
        Ok(queued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::webhook::Webhook;
    use crate::infrastructure::repositories::webhook_event_repo_impl::WebhookEventRepoImpl;
    use crate::infrastructure::repositories::webhook_repo_impl::WebhookRepoImpl;
    use chrono::Utc;

    #[tokio::test]
    async fn test_publish_only_to_subscribed_active_hooks() {
        let hooks = Arc::new(WebhookRepoImpl::new());
        let events = Arc::new(WebhookEventRepoImpl::new());
        let dispatcher = WebhookDispatcher::new(hooks.clone(), events.clone(), 5);
        let user = Uuid::new_v4();

        let subscribed = Webhook::new(
            user,
            "https://a.example/hook".into(),
            vec![WebhookEventType::JobCompleted],
            "s1".into(),
        );
        let other_event = Webhook::new(
            user,
            "https://b.example/hook".into(),
            vec![WebhookEventType::CallCompleted],
            "s2".into(),
        );
        let mut inactive = Webhook::new(
            user,
            "https://c.example/hook".into(),
            vec![WebhookEventType::JobCompleted],
            "s3".into(),
        );
        inactive.active = false;
        let foreign = Webhook::new(
            Uuid::new_v4(),
            "https://d.example/hook".into(),
            vec![WebhookEventType::JobCompleted],
            "s4".into(),
        );
        for hook in [&subscribed, &other_event, &inactive, &foreign] {
            hooks.create(hook).await.unwrap();
        }

        let queued = dispatcher
            .publish(user, WebhookEventType::JobCompleted, serde_json::json!({"job_id": "x"}))
            .await
            .unwrap();
        assert_eq!(queued, 1);

        let ready = events.find_ready(Utc::now(), 10).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].webhook_id, subscribed.id);
        assert_eq!(ready[0].max_retries, 5);
        assert_eq!(ready[0].payload["event"], "job.completed");
        assert_eq!(ready[0].payload["data"]["job_id"], "x");
    }
}
