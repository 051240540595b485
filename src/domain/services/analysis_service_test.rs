// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::analysis::FacilityAnalysis;
use crate::domain::models::facility::{FacilityData, WebsiteQuality};
use crate::domain::services::analysis_service::*;
use crate::domain::services::llm_service::{LLMServiceTrait, TokenUsage};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

struct FixedLlm(Result<String, String>);

#[async_trait]
impl LLMServiceTrait for FixedLlm {
    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<(String, TokenUsage)> {
        match &self.0 {
            Ok(text) => Ok((text.clone(), TokenUsage::default())),
            Err(e) => Err(anyhow::anyhow!(e.clone())),
        }
    }
}

fn facility() -> FacilityData {
    FacilityData {
        url: "https://clinic.example.com".to_string(),
        facility_name: Some("Community Health Clinic".to_string()),
        phone: vec!["(555) 123-4567".to_string()],
        address: Some("123 Main St, Springfield, IL".to_string()),
        services: vec!["Primary Care".to_string(), "Urgent Care".to_string()],
        website_quality: WebsiteQuality {
            score: 4,
            max_score: 10,
            percentage: 45.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn analysis(name: &str, score: u32) -> FacilityAnalysis {
    let mut a = basic_analysis(&facility());
    a.facility_name = name.to_string();
    a.lead_score = score;
    a
}

#[test]
fn test_basic_lead_score_components() {
    // 50 + 10 + 10 + 15 + 4
    assert_eq!(basic_lead_score(&facility()), 89);

    let empty = FacilityData::default();
    assert_eq!(basic_lead_score(&empty), 50);
}

#[test]
fn test_basic_lead_score_is_capped() {
    let mut data = facility();
    data.website_quality.percentage = 100.0;
    assert_eq!(basic_lead_score(&data), 95);

    data.website_quality.percentage = 400.0;
    assert_eq!(basic_lead_score(&data), 100);
}

#[test]
fn test_parse_analysis_extracts_embedded_json() {
    let text = r#"Here is my analysis:
{"lead_score": 72, "urgency": "high", "revenue_opportunities": [{"opportunity": "telehealth"}],
 "operational_gaps": [], "recommended_pitch": "Grow with telehealth"}
Thanks!"#;
    let result = parse_analysis(text, &facility());

    assert_eq!(result.lead_score, 72);
    assert_eq!(result.urgency, "high");
    assert_eq!(result.revenue_opportunities.len(), 1);
    assert_eq!(result.recommended_pitch, "Grow with telehealth");
    assert!(result.raw_analysis.is_none());
}

#[test]
fn test_parse_analysis_falls_back_to_raw() {
    let result = parse_analysis("no json here", &facility());
    assert_eq!(result.lead_score, 0);
    assert_eq!(result.raw_analysis.as_deref(), Some("no json here"));

    let broken = parse_analysis("{not: valid}", &facility());
    assert_eq!(broken.lead_score, 0);
    assert!(broken.raw_analysis.is_some());
}

#[test]
fn test_score_leads_ranks_descending() {
    let leads = score_leads(&[analysis("a", 40), analysis("b", 90), analysis("c", 65)]);
    let order: Vec<(&str, usize)> = leads
        .iter()
        .map(|l| (l.facility_name.as_str(), l.rank))
        .collect();
    assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
    assert_eq!(leads[0].revenue_opportunities_count, 2);
    assert_eq!(leads[0].operational_gaps_count, 1);
}

#[test]
fn test_score_leads_empty() {
    assert!(score_leads(&[]).is_empty());
}

#[tokio::test]
async fn test_without_llm_uses_basic_analysis() {
    let service = AnalysisService::new(None);
    let result = service.analyze_facility(&facility()).await;

    assert_eq!(result.lead_score, 89);
    assert_eq!(result.urgency, "medium");
    assert!(result.note.is_some());
    assert_eq!(service.generate_call_script(&result).await, SCRIPT_FALLBACK);
}

#[tokio::test]
async fn test_llm_failure_degrades_to_basic_analysis() {
    let llm: Arc<dyn LLMServiceTrait> = Arc::new(FixedLlm(Err("timeout".to_string())));
    let service = AnalysisService::new(Some(llm));

    let result = service.analyze_facility(&facility()).await;
    assert_eq!(result.lead_score, 89);
    assert_eq!(service.generate_call_script(&result).await, SCRIPT_FALLBACK);
}

#[tokio::test]
async fn test_llm_analysis_and_script() {
    let llm: Arc<dyn LLMServiceTrait> = Arc::new(FixedLlm(Ok(
        r#"{"lead_score": 81, "urgency": "low"}"#.to_string(),
    )));
    let service = AnalysisService::new(Some(llm));

    let result = service.analyze_facility(&facility()).await;
    assert_eq!(result.lead_score, 81);
    assert_eq!(result.urgency, "low");
    assert_eq!(result.facility_name, "Community Health Clinic");

    // the fake echoes its fixed text for the script too
    let script = service.generate_call_script(&result).await;
    assert!(script.contains("lead_score"));
}

#[tokio::test]
async fn test_analyze_many_sorted() {
    let service = AnalysisService::new(None);
    let mut weak = facility();
    weak.phone.clear();
    weak.services.clear();

    let results = service.analyze_many(&[weak, facility()]).await;
    assert_eq!(results.len(), 2);
    assert!(results[0].lead_score >= results[1].lead_score);
}
