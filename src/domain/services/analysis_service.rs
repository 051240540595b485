// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::analysis::{FacilityAnalysis, ScoredLead};
use crate::domain::models::facility::FacilityData;
use crate::domain::services::llm_service::LLMServiceTrait;
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 脚本生成失败时的回退文本
pub const SCRIPT_FALLBACK: &str = "Unable to generate script at this time.";

const ANALYSIS_MAX_TOKENS: u32 = 1500;
const SCRIPT_MAX_TOKENS: u32 = 500;
const DEFAULT_URGENCY: &str = "medium";
const BASIC_PITCH: &str = "We help healthcare facilities improve patient engagement.";
const BASIC_NOTE: &str = "Basic analysis (AI not available)";

/// 机构分析服务
///
/// 配置了LLM时请求结构化分析，否则（或LLM失败时）退化为基于规则的基础分析
#[derive(Clone)]
pub struct AnalysisService {
    llm: Option<Arc<dyn LLMServiceTrait>>,
}

impl AnalysisService {
    pub fn new(llm: Option<Arc<dyn LLMServiceTrait>>) -> Self {
        Self { llm }
    }

    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// 分析单个机构
    pub async fn analyze_facility(&self, facility: &FacilityData) -> FacilityAnalysis {
        let Some(llm) = &self.llm else {
            warn!("LLM not configured, returning basic analysis");
            return basic_analysis(facility);
        };

        match llm
            .complete(&analysis_prompt(facility), ANALYSIS_MAX_TOKENS)
            .await
        {
            Ok((text, usage)) => {
                info!(
                    facility = facility.display_name(),
                    tokens = usage.total_tokens,
                    "Analyzed facility"
                );
                parse_analysis(&text, facility)
            }
            Err(e) => {
                error!("Failed to analyze facility: {}", e);
                basic_analysis(facility)
            }
        }
    }

    /// 依次分析多个机构并按线索评分降序排列
    pub async fn analyze_many(&self, facilities: &[FacilityData]) -> Vec<FacilityAnalysis> {
        let mut analyses = Vec::with_capacity(facilities.len());
        for facility in facilities {
            analyses.push(self.analyze_facility(facility).await);
        }
        analyses.sort_by(|a, b| b.lead_score.cmp(&a.lead_score));
        analyses
    }

    /// 生成个性化外呼脚本
    pub async fn generate_call_script(&self, analysis: &FacilityAnalysis) -> String {
        let Some(llm) = &self.llm else {
            return SCRIPT_FALLBACK.to_string();
        };

        match llm.complete(&script_prompt(analysis), SCRIPT_MAX_TOKENS).await {
            Ok((script, _)) => {
                info!("Generated call script for {}", analysis.facility_name);
                script
            }
            Err(e) => {
                error!("Failed to generate call script: {}", e);
                SCRIPT_FALLBACK.to_string()
            }
        }
    }
}

/// 按线索评分排序并从1开始编号；同分保持输入顺序
pub fn score_leads(analyses: &[FacilityAnalysis]) -> Vec<ScoredLead> {
    let mut leads: Vec<ScoredLead> = analyses
        .iter()
        .map(|a| ScoredLead {
            rank: 0,
            facility_name: a.facility_name.clone(),
            url: a.url.clone(),
            lead_score: a.lead_score,
            urgency: a.urgency.clone(),
            revenue_opportunities_count: a.revenue_opportunities.len(),
            operational_gaps_count: a.operational_gaps.len(),
            recommended_pitch: a.recommended_pitch.clone(),
        })
        .collect();

    leads.sort_by(|a, b| b.lead_score.cmp(&a.lead_score));
    for (i, lead) in leads.iter_mut().enumerate() {
        lead.rank = i + 1;
    }
    leads
}

/// 基础线索评分：50分起，电话+10，地址+10，服务+15，再加网站质量百分比的十分之一，上限100
pub fn basic_lead_score(facility: &FacilityData) -> u32 {
    let mut score = 50;
    if !facility.phone.is_empty() {
        score += 10;
    }
    if facility.address.is_some() {
        score += 10;
    }
    if !facility.services.is_empty() {
        score += 15;
    }
    score += (facility.website_quality.percentage / 10.0).max(0.0) as u32;
    score.min(100)
}

/// 不依赖LLM的基础分析
pub fn basic_analysis(facility: &FacilityData) -> FacilityAnalysis {
    let lead_score = basic_lead_score(facility);
    let revenue_opportunities = vec![
        json!("Improved online presence"),
        json!("Better contact methods"),
    ];
    let operational_gaps = vec![json!("Limited online booking")];

    FacilityAnalysis {
        facility_name: facility.display_name().to_string(),
        url: Some(facility.url.clone()),
        analyzed_at: Utc::now(),
        analysis: json!({
            "revenue_opportunities": revenue_opportunities,
            "operational_gaps": operational_gaps,
            "lead_score": lead_score,
            "urgency": DEFAULT_URGENCY,
        }),
        lead_score,
        urgency: DEFAULT_URGENCY.to_string(),
        revenue_opportunities,
        operational_gaps,
        recommended_pitch: BASIC_PITCH.to_string(),
        raw_analysis: None,
        note: Some(BASIC_NOTE.to_string()),
    }
}

/// 解析LLM输出：截取首个 `{` 到最后一个 `}` 之间的内容作为JSON
pub fn parse_analysis(text: &str, facility: &FacilityData) -> FacilityAnalysis {
    let parsed = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => {
            serde_json::from_str::<Value>(&text[start..=end]).ok()
        }
        _ => None,
    };

    let Some(analysis) = parsed.filter(Value::is_object) else {
        warn!("Failed to parse JSON from LLM response, returning raw analysis");
        return FacilityAnalysis {
            facility_name: facility.display_name().to_string(),
            url: Some(facility.url.clone()),
            analyzed_at: Utc::now(),
            analysis: json!({ "raw_analysis": text }),
            lead_score: 0,
            urgency: DEFAULT_URGENCY.to_string(),
            revenue_opportunities: Vec::new(),
            operational_gaps: Vec::new(),
            recommended_pitch: String::new(),
            raw_analysis: Some(text.to_string()),
            note: None,
        };
    };

    let lead_score = analysis
        .get("lead_score")
        .and_then(Value::as_f64)
        .map(|s| s.round().clamp(0.0, 100.0) as u32)
        .unwrap_or(0);
    let list = |key: &str| {
        analysis
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    };
    let text_field = |key: &str, default: &str| {
        analysis
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    FacilityAnalysis {
        facility_name: facility.display_name().to_string(),
        url: Some(facility.url.clone()),
        analyzed_at: Utc::now(),
        lead_score,
        urgency: text_field("urgency", DEFAULT_URGENCY),
        revenue_opportunities: list("revenue_opportunities"),
        operational_gaps: list("operational_gaps"),
        recommended_pitch: text_field("recommended_pitch", ""),
        raw_analysis: None,
        note: None,
        analysis,
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

fn analysis_prompt(facility: &FacilityData) -> String {
    let insurance = serde_json::to_string(&facility.insurance).unwrap_or_default();
    let contact = serde_json::to_string(&facility.contact_methods).unwrap_or_default();

    format!(
        r#"You are an expert healthcare business consultant analyzing a healthcare facility for revenue opportunities and operational gaps.

FACILITY INFORMATION:
- Name: {name}
- Website: {url}
- Phone Numbers: {phones}
- Address: {address}
- Services: {services}
- Specialties: {specialties}
- Website Quality Score: {quality:.0}%
- Insurance Accepted: {insurance}
- Contact Methods: {contact}

Respond with a single JSON object with these keys:
"revenue_opportunities" (list of {{"opportunity", "description", "potential_impact", "implementation_difficulty"}}),
"operational_gaps" (list of {{"gap", "description", "recommendation"}}),
"competitive_positioning" ({{"strengths", "weaknesses", "opportunities"}}),
"lead_score" (0-100), "lead_score_reasoning", "recommended_pitch",
"urgency" (high/medium/low), "next_steps" (list).

Focus on revenue leaks, digital presence gaps, operational inefficiencies,
market opportunities and compliance gaps. Base recommendations on the data provided."#,
        name = facility.display_name(),
        url = facility.url,
        phones = join_or(&facility.phone, "Not found"),
        address = facility.address.as_deref().unwrap_or("Not found"),
        services = join_or(&facility.services, "Not specified"),
        specialties = join_or(&facility.specialties, "Not specified"),
        quality = facility.website_quality.percentage,
        insurance = insurance,
        contact = contact,
    )
}

fn script_prompt(analysis: &FacilityAnalysis) -> String {
    let details = serde_json::to_string_pretty(&analysis.analysis).unwrap_or_default();
    format!(
        r#"Based on this healthcare facility analysis, create a concise, professional 30-second cold call script.

Facility: {}
Analysis: {}
Recommended Pitch: {}

Open with a hook about their specific opportunity, reference one identified gap,
propose a brief conversation and end with a clear call-to-action.
Format as a natural conversation script."#,
        analysis.facility_name, details, analysis.recommended_pitch
    )
}
