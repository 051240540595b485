// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::webhook::WebhookEventType;
use serde::Deserialize;
use validator::Validate;

/// 注册Webhook请求DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWebhookRequestDto {
    #[validate(url)]
    pub url: String,

    /// 订阅的事件类型，至少一个
    #[validate(length(min = 1))]
    pub events: Vec<WebhookEventType>,

    /// 签名密钥，省略时自动生成
    #[validate(length(min = 16, max = 256))]
    pub secret: Option<String>,
}
