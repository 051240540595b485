// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 抓取任务（job）：单个、批量或分析任务及其生命周期
/// - 机构数据（facility）：从网站提取的结构化信息
/// - 分析结果（analysis）：线索评分与销售建议
/// - 呼叫记录（call）：外呼尝试及统计
/// - 通知（notification）、API密钥（api_key）与Webhook（webhook）
pub mod analysis;
pub mod api_key;
pub mod call;
pub mod facility;
pub mod job;
pub mod notification;
pub mod webhook;
