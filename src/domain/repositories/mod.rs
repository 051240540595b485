// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 任务仓库（job_repository）：抓取任务的持久化与周期任务查询
/// - 呼叫仓库（call_repository）：外呼记录
/// - 通知仓库（notification_repository）：用户通知
/// - API密钥仓库（api_key_repository）：密钥摘要与归属
/// - Webhook仓库（webhook_repository）与Webhook事件仓库（webhook_event_repository）
pub mod api_key_repository;
pub mod call_repository;
pub mod job_repository;
pub mod notification_repository;
pub mod webhook_event_repository;
pub mod webhook_repository;
