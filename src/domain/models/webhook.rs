// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Webhook实体
///
/// 表示一个用户注册的回调端点，只接收其订阅的事件类型。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    /// Webhook唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 回调URL
    pub url: String,
    /// 订阅的事件类型
    pub events: Vec<WebhookEventType>,
    /// 签名密钥
    #[serde(skip_serializing)]
    pub secret: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Webhook {
    pub fn new(user_id: Uuid, url: String, events: Vec<WebhookEventType>, secret: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            url,
            events,
            secret,
            active: true,
            created_at: Utc::now(),
        }
    }

    pub fn subscribes_to(&self, event_type: WebhookEventType) -> bool {
        self.active && self.events.contains(&event_type)
    }
}

/// Webhook事件实体
///
/// 一次待投递的通知，记录投递状态与重试信息。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub webhook_id: Uuid,
    pub event_type: WebhookEventType,
    pub payload: serde_json::Value,
    pub webhook_url: String,
    pub status: WebhookStatus,
    /// 已尝试投递次数
    pub attempt_count: u32,
    pub max_retries: u32,
    pub response_status: Option<u16>,
    pub error_message: Option<String>,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl WebhookEvent {
    pub fn new(
        webhook: &Webhook,
        event_type: WebhookEventType,
        payload: serde_json::Value,
        max_retries: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: webhook.user_id,
            webhook_id: webhook.id,
            event_type,
            payload,
            webhook_url: webhook.url.clone(),
            status: WebhookStatus::Pending,
            attempt_count: 0,
            max_retries,
            response_status: None,
            error_message: None,
            next_retry_at: None,
            created_at: now,
            updated_at: now,
            delivered_at: None,
        }
    }

    /// 是否可以在给定时间投递
    pub fn is_ready(&self, now: DateTime<Utc>) -> bool {
        matches!(self.status, WebhookStatus::Pending | WebhookStatus::Failed)
            && self.next_retry_at.map(|at| at <= now).unwrap_or(true)
    }
}

/// Webhook事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "job.completed")]
    JobCompleted,
    #[serde(rename = "job.failed")]
    JobFailed,
    #[serde(rename = "call.completed")]
    CallCompleted,
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookEventType::JobCompleted => write!(f, "job.completed"),
            WebhookEventType::JobFailed => write!(f, "job.failed"),
            WebhookEventType::CallCompleted => write!(f, "call.completed"),
        }
    }
}

impl FromStr for WebhookEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job.completed" => Ok(WebhookEventType::JobCompleted),
            "job.failed" => Ok(WebhookEventType::JobFailed),
            "call.completed" => Ok(WebhookEventType::CallCompleted),
            other => Err(format!("Unknown webhook event type: {}", other)),
        }
    }
}

/// Webhook状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
    /// 待处理
    #[default]
    Pending,
    /// 已投递
    Delivered,
    /// 投递失败，等待重试
    Failed,
    /// 达到最大重试次数
    Dead,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_subscription_respects_active_flag() {
        let mut hook = Webhook::new(
            Uuid::new_v4(),
            "https://hooks.example.com".into(),
            vec![WebhookEventType::JobCompleted],
            "secret".into(),
        );
        assert!(hook.subscribes_to(WebhookEventType::JobCompleted));
        assert!(!hook.subscribes_to(WebhookEventType::CallCompleted));

        hook.active = false;
        assert!(!hook.subscribes_to(WebhookEventType::JobCompleted));
    }

    #[test]
    fn test_event_type_wire_names() {
        let json = serde_json::to_string(&WebhookEventType::CallCompleted).unwrap();
        assert_eq!(json, "\"call.completed\"");
        assert_eq!(
            "job.failed".parse::<WebhookEventType>(),
            Ok(WebhookEventType::JobFailed)
        );
        assert!("order.shipped".parse::<WebhookEventType>().is_err());
    }

    #[test]
    fn test_event_readiness() {
        let hook = Webhook::new(
            Uuid::new_v4(),
            "https://hooks.example.com".into(),
            vec![WebhookEventType::JobCompleted],
            "secret".into(),
        );
        let mut event = WebhookEvent::new(&hook, WebhookEventType::JobCompleted, serde_json::json!({}), 3);
        let now = Utc::now();
        assert!(event.is_ready(now));

        event.status = WebhookStatus::Failed;
        event.next_retry_at = Some(now + Duration::seconds(30));
        assert!(!event.is_ready(now));
        assert!(event.is_ready(now + Duration::seconds(31)));

        event.status = WebhookStatus::Dead;
        assert!(!event.is_ready(now + Duration::days(1)));
    }
}
