// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use validator::Validate;

/// 创建API密钥请求DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApiKeyRequestDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// 有效天数，省略表示永不过期
    #[validate(range(min = 1, max = 3650))]
    pub expires_in_days: Option<i64>,
}
