// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use uuid::Uuid;

/// 限流结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// 允许通过
    Allowed,
    /// 需要等待（包含等待时间）
    RetryAfter { retry_after_seconds: u64 },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed)
    }
}

/// 限流服务接口
#[async_trait]
pub trait RateLimitingService: Send + Sync {
    /// 检查并消耗用户的一次请求配额
    async fn check_rate_limit(&self, user_id: Uuid) -> RateLimitResult;
}
