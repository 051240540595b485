// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 机构分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityAnalysis {
    pub facility_name: String,
    pub url: Option<String>,
    pub analyzed_at: DateTime<Utc>,
    /// LLM返回的完整分析（或基础分析）
    pub analysis: serde_json::Value,
    /// 0-100
    pub lead_score: u32,
    pub urgency: String,
    #[serde(default)]
    pub revenue_opportunities: Vec<serde_json::Value>,
    #[serde(default)]
    pub operational_gaps: Vec<serde_json::Value>,
    #[serde(default)]
    pub recommended_pitch: String,
    /// 无法解析LLM输出时保留的原始文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// 排名后的销售线索
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredLead {
    pub rank: usize,
    pub facility_name: String,
    pub url: Option<String>,
    pub lead_score: u32,
    pub urgency: String,
    pub revenue_opportunities_count: usize,
    pub operational_gaps_count: usize,
    pub recommended_pitch: String,
}
