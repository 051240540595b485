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

use crate::domain::models::webhook::{WebhookEvent, WebhookStatus};
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::repositories::webhook_repository::WebhookRepository;
use crate::domain::services::webhook_service::WebhookService;
use crate::utils::errors::WorkerError;
use crate::utils::retry_policy::RetryPolicy;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

const DELIVERY_CONCURRENCY: usize = 10;

/// Webhook工作器
///
/// 定期取出到期的事件，使用订阅方的密钥签名后投递；
/// 失败按指数退避重试，超过最大次数后标记为 dead
#[derive(Clone)]
pub struct WebhookWorker {
    events: Arc<dyn WebhookEventRepository>,
    webhooks: Arc<dyn WebhookRepository>,
    sender: Arc<dyn WebhookService>,
    retry_policy: RetryPolicy,
    interval: Duration,
    batch_size: usize,
}

impl WebhookWorker {
    pub fn new(
        events: Arc<dyn WebhookEventRepository>,
        webhooks: Arc<dyn WebhookRepository>,
        sender: Arc<dyn WebhookService>,
        interval: Duration,
        batch_size: usize,
    ) -> Self {
        Self {
            events,
            webhooks,
            sender,
            retry_policy: RetryPolicy::default(),
            interval,
            batch_size,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// 处理到期的Webhook事件
    ///
    /// # 返回值
    ///
    /// 本批处理的事件数量
    pub async fn process_pending_webhooks(&self) -> Result<usize, WorkerError> {
        let events = self.events.find_ready(Utc::now(), self.batch_size).await?;

        if events.is_empty() {
            return Ok(0);
        }

        let count = events.len();
        info!("Processing {} pending webhooks", count);

        let worker = self;
        futures::stream::iter(events)
            .for_each_concurrent(DELIVERY_CONCURRENCY, |event| {
                let w = worker;
                async move {
                    if let Err(e) = w.deliver_webhook(event).await {
                        error!("Failed to deliver webhook: {}", e);
                    }
                }
            })
            .await;

        Ok(count)
    }

    async fn deliver_webhook(&self, mut event: WebhookEvent) -> Result<(), WorkerError> {
        let webhook = match self.webhooks.find_by_id(event.webhook_id).await? {
            Some(webhook) if webhook.active => webhook,
            _ => {
                warn!("Webhook {} removed or inactive, dropping event {}", event.webhook_id, event.id);
                event.status = WebhookStatus::Dead;
                event.error_message = Some("Webhook removed or inactive".to_string());
                event.updated_at = Utc::now();
                self.events.update(&event).await?;
                counter!("webhook_dead_letter_total").increment(1);
                return Ok(());
            }
        };

        info!("Delivering webhook {} to {}", event.id, event.webhook_url);
        counter!("webhook_delivery_attempts_total").increment(1);

        let start = std::time::Instant::now();
        let result = self.sender.send_webhook(&event, &webhook.secret).await;
        histogram!("webhook_delivery_duration_seconds").record(start.elapsed().as_secs_f64());

        match result {
            Ok(status) => {
                let now = Utc::now();
                event.response_status = Some(status);
                event.status = WebhookStatus::Delivered;
                event.attempt_count += 1;
                event.error_message = None;
                event.delivered_at = Some(now);
                event.updated_at = now;
                self.events.update(&event).await?;

                info!("Webhook {} delivered successfully", event.id);
                counter!("webhook_delivery_success_total").increment(1);
            }
            Err(e) => {
                error!("Webhook {} delivery failed: {}", event.id, e);
                event.error_message = Some(e.to_string());
                self.handle_failure(event).await?;
                counter!("webhook_delivery_failed_total").increment(1);
            }
        }

        Ok(())
    }

    async fn handle_failure(&self, mut event: WebhookEvent) -> Result<(), WorkerError> {
        let now = Utc::now();
        event.attempt_count += 1;
        event.updated_at = now;

        if event.attempt_count >= event.max_retries {
            event.status = WebhookStatus::Dead;
            event.next_retry_at = None;
            info!(
                "Webhook {} moved to dead letter state after {} attempts",
                event.id, event.attempt_count
            );
            counter!("webhook_dead_letter_total").increment(1);
        } else {
            event.status = WebhookStatus::Failed;
            event.next_retry_at = Some(self.retry_policy.next_retry_time(event.attempt_count, now));
        }

        self.events.update(&event).await?;
        Ok(())
    }
}

#[async_trait]
impl Worker for WebhookWorker {
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Webhook worker started");
        loop {
            if let Err(e) = self.process_pending_webhooks().await {
                error!("Error processing webhooks: {}", e);
            }
            sleep(self.interval).await;
        }
    }

    fn name(&self) -> &str {
        "webhook_worker"
    }
}
