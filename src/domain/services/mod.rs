// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务。
///
/// 包含的服务：
/// - 合规服务（compliance_service）：区号定位、营业时间与双方同意州检查
/// - 行业分类（industry_classifier）：基于关键词频率的行业判定
/// - URL校验（url_validator）：批量URL的格式校验与去重
/// - 提取服务（extraction_service）：从机构网站提取结构化信息
/// - LLM服务（llm_service）与分析服务（analysis_service）：线索评分与外呼脚本
/// - 呼叫服务（call_service）：外呼前检查、记录与统计
/// - Webhook服务（webhook_service）：事件分发与发送接口
/// - 限流服务（rate_limiting_service）：按用户限流接口
pub mod analysis_service;
#[cfg(test)]
mod analysis_service_test;
pub mod call_service;
pub mod compliance_service;
#[cfg(test)]
mod compliance_service_test;
pub mod extraction_service;
pub mod industry_classifier;
pub mod llm_service;
pub mod rate_limiting_service;
pub mod url_validator;
pub mod webhook_service;
