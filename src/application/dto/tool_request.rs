// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::analysis::FacilityAnalysis;
use crate::domain::models::facility::FacilityData;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 同步分析请求DTO
///
/// 提供 `url` 时先抓取再分析，否则直接分析 `facility_data`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AnalyzeRequestDto {
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,

    pub facility_data: Option<FacilityData>,

    /// 是否同时生成外呼脚本
    #[serde(default)]
    pub include_script: bool,
}

/// 同步分析响应
#[derive(Debug, Serialize)]
pub struct AnalyzeResponseDto {
    pub success: bool,
    pub facility: FacilityData,
    pub analysis: FacilityAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

/// URL校验请求DTO
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ValidateUrlsRequestDto {
    #[validate(length(max = 200000))]
    pub text: String,
}

/// 行业分类请求DTO
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ClassifyRequestDto {
    #[validate(length(min = 1))]
    pub text: String,
}

/// 合规检查请求DTO
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ComplianceCheckRequestDto {
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}
