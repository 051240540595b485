// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::rate_limiting_service::{RateLimitResult, RateLimitingService};
use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use uuid::Uuid;

/// 限流服务实现
///
/// 基于 governor 的进程内令牌桶，按用户ID分桶
pub struct RateLimitingServiceImpl {
    limiter: DefaultKeyedRateLimiter<Uuid>,
    clock: DefaultClock,
}

impl RateLimitingServiceImpl {
    /// 按每分钟请求数创建限流器，`0` 视为 1
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(rpm)),
            clock: DefaultClock::default(),
        }
    }
}

#[async_trait]
impl RateLimitingService for RateLimitingServiceImpl {
    async fn check_rate_limit(&self, user_id: Uuid) -> RateLimitResult {
        match self.limiter.check_key(&user_id) {
            Ok(()) => RateLimitResult::Allowed,
            Err(not_until) => {
                let wait = not_until.wait_time_from(self.clock.now());
                RateLimitResult::RetryAfter {
                    retry_after_seconds: wait.as_secs().max(1),
                }
            }
        }
    }
}
