// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 指标（metrics）：Prometheus 导出器
/// - 仓库实现（repositories）：领域仓库接口的进程内实现
/// - 服务实现（services）：限流与Webhook发送
/// - 语音（voice）：Twilio 与模拟语音服务商
pub mod metrics;
pub mod repositories;
pub mod services;
pub mod voice;
