// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

/// 通知列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQueryDto {
    /// 仅返回未读通知
    #[serde(default)]
    pub unread: bool,
}
