// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::call::{CallRecord, CallStatistics, CallStatus};
use crate::domain::models::webhook::WebhookEventType;
use crate::domain::repositories::call_repository::CallRepository;
use crate::domain::services::compliance_service::{check_call_compliance, ComplianceVerdict};
use crate::domain::services::webhook_service::WebhookDispatcher;
use crate::utils::errors::ServiceError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 拒绝呼叫时返回的错误信息
pub const NOT_COMPLIANT_ERROR: &str = "Call not compliant with regulations";
pub const REASON_INVALID_FORMAT: &str = "Invalid phone number format";
pub const REASON_DO_NOT_CALL: &str = "Number is on Do Not Call list";

static PHONE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?1?\s*\(?(\d{3})\)?[-.\s]?(\d{3})[-.\s]?(\d{4})$")
        .expect("Failed to compile phone format regex")
});

/// 语音服务商的呼叫结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPlacement {
    pub status: CallStatus,
    pub provider_call_id: Option<String>,
    pub outcome: Option<String>,
    pub duration_secs: Option<u32>,
    pub transcript: Option<String>,
    /// 呼叫是否已结束（模拟呼叫立即结束）
    pub ended: bool,
    pub note: Option<String>,
}

/// 语音服务商特质
#[async_trait]
pub trait VoiceProvider: Send + Sync {
    /// 发起呼叫
    async fn place_call(&self, call: &CallRecord) -> anyhow::Result<CallPlacement>;

    /// 服务商名称
    fn name(&self) -> &'static str;
}

/// 呼叫请求
#[derive(Debug, Clone, Default)]
pub struct CallRequest {
    pub facility_name: String,
    pub phone_number: String,
    pub script: Option<String>,
    pub job_id: Option<Uuid>,
    pub auto_triggered: bool,
}

/// 呼叫尝试的结果
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// 已记录并交给语音服务商
    Placed {
        call: CallRecord,
        note: Option<String>,
    },
    /// 已记录，但服务商调用失败
    ProviderFailed { call: CallRecord, error: String },
    /// 未通过检查，不产生记录
    Rejected {
        issues: Vec<String>,
        compliance: ComplianceVerdict,
    },
}

/// 号码格式检查
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_FORMAT.is_match(phone.trim())
}

/// 仅保留数字并去掉美国国家码
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('1') {
        Some(rest) if digits.len() == 11 => rest.to_string(),
        _ => digits,
    }
}

/// 呼叫服务
///
/// 依次执行格式、禁呼名单和合规检查，通过后记录并交给语音服务商
#[derive(Clone)]
pub struct CallService {
    repo: Arc<dyn CallRepository>,
    provider: Arc<dyn VoiceProvider>,
    webhooks: Option<WebhookDispatcher>,
    do_not_call: Arc<HashSet<String>>,
}

impl CallService {
    pub fn new(
        repo: Arc<dyn CallRepository>,
        provider: Arc<dyn VoiceProvider>,
        do_not_call: &[String],
    ) -> Self {
        Self {
            repo,
            provider,
            webhooks: None,
            do_not_call: Arc::new(do_not_call.iter().map(|p| normalize_phone(p)).collect()),
        }
    }

    pub fn with_webhooks(mut self, webhooks: WebhookDispatcher) -> Self {
        self.webhooks = Some(webhooks);
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn is_on_do_not_call_list(&self, phone: &str) -> bool {
        self.do_not_call.contains(&normalize_phone(phone))
    }

    /// 汇总全部检查，返回阻止呼叫的原因和合规结论
    pub fn screen(&self, phone: &str, now: DateTime<Utc>) -> (Vec<String>, ComplianceVerdict) {
        let mut issues = Vec::new();
        if !is_valid_phone(phone) {
            issues.push(REASON_INVALID_FORMAT.to_string());
        }
        if self.is_on_do_not_call_list(phone) {
            issues.push(REASON_DO_NOT_CALL.to_string());
        }
        let verdict = check_call_compliance(phone, now);
        issues.extend(verdict.blockers.iter().cloned());
        (issues, verdict)
    }

    /// 尝试发起呼叫
    pub async fn trigger_call(
        &self,
        user_id: Uuid,
        request: CallRequest,
        now: DateTime<Utc>,
    ) -> Result<CallOutcome, ServiceError> {
        let (issues, compliance) = self.screen(&request.phone_number, now);
        if !issues.is_empty() {
            warn!(
                "Cannot call {}: {}",
                request.facility_name,
                issues.join(", ")
            );
            counter!("calls_blocked_total").increment(1);
            return Ok(CallOutcome::Rejected { issues, compliance });
        }

        let mut call = CallRecord::new(user_id, request.facility_name, request.phone_number);
        call.job_id = request.job_id;
        call.script = request.script;
        call.auto_triggered = request.auto_triggered;
        call.compliance = Some(compliance);
        self.repo.create(&call).await?;

        match self.provider.place_call(&call).await {
            Ok(placement) => {
                let started = Utc::now();
                call.status = placement.status;
                call.provider_call_id = placement.provider_call_id;
                call.outcome = placement.outcome;
                call.duration_secs = placement.duration_secs;
                call.transcript = placement.transcript;
                call.started_at = Some(started);
                if placement.ended {
                    call.ended_at = Some(started);
                }
                self.repo.update(&call).await?;

                info!(
                    "Call initiated to {} via {}: {}",
                    call.facility_name,
                    self.provider.name(),
                    call.id
                );
                counter!("calls_placed_total", "provider" => self.provider.name()).increment(1);
                self.publish_call(&call).await;

                Ok(CallOutcome::Placed {
                    call,
                    note: placement.note,
                })
            }
            Err(e) => {
                error!("Failed to initiate call: {}", e);
                call.status = CallStatus::Failed;
                call.ended_at = Some(Utc::now());
                self.repo.update(&call).await?;
                counter!("calls_failed_total", "provider" => self.provider.name()).increment(1);

                Ok(CallOutcome::ProviderFailed {
                    call,
                    error: e.to_string(),
                })
            }
        }
    }

    async fn publish_call(&self, call: &CallRecord) {
        let Some(webhooks) = &self.webhooks else {
            return;
        };
        let data = serde_json::json!({
            "call_id": call.id,
            "job_id": call.job_id,
            "facility_name": call.facility_name,
            "phone_number": call.phone_number,
            "status": call.status,
            "outcome": call.outcome,
            "duration_secs": call.duration_secs,
        });
        if let Err(e) = webhooks
            .publish(call.user_id, WebhookEventType::CallCompleted, data)
            .await
        {
            error!("Failed to queue call webhook: {}", e);
        }
    }

    /// 呼叫历史，可按机构名过滤
    pub async fn history(
        &self,
        user_id: Uuid,
        facility_name: Option<&str>,
    ) -> Result<Vec<CallRecord>, ServiceError> {
        Ok(self.repo.find_by_user(user_id, facility_name).await?)
    }

    /// 呼叫统计
    pub async fn statistics(&self, user_id: Uuid) -> Result<CallStatistics, ServiceError> {
        let calls = self.repo.find_by_user(user_id, None).await?;
        Ok(CallStatistics::from_records(&calls))
    }
}
