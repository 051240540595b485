// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::compliance_service::ComplianceVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// 外呼记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// 触发呼叫的抓取任务
    pub job_id: Option<Uuid>,
    pub facility_name: String,
    pub phone_number: String,
    pub status: CallStatus,
    pub outcome: Option<String>,
    pub duration_secs: Option<u32>,
    /// AI生成的呼叫脚本
    pub script: Option<String>,
    /// 语音服务商返回的呼叫ID
    pub provider_call_id: Option<String>,
    pub transcript: Option<String>,
    /// 是否由任务完成后自动触发
    pub auto_triggered: bool,
    pub compliance: Option<ComplianceVerdict>,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CallRecord {
    pub fn new(user_id: Uuid, facility_name: String, phone_number: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            job_id: None,
            facility_name,
            phone_number,
            status: CallStatus::Pending,
            outcome: None,
            duration_secs: None,
            script: None,
            provider_call_id: None,
            transcript: None,
            auto_triggered: false,
            compliance: None,
            created_at: Utc::now(),
            started_at: None,
            ended_at: None,
        }
    }
}

/// 呼叫状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    #[default]
    Pending,
    Initiated,
    Ringing,
    InProgress,
    Completed,
    Failed,
    NoAnswer,
    Voicemail,
    Declined,
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CallStatus::Pending => "pending",
            CallStatus::Initiated => "initiated",
            CallStatus::Ringing => "ringing",
            CallStatus::InProgress => "in_progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::NoAnswer => "no_answer",
            CallStatus::Voicemail => "voicemail",
            CallStatus::Declined => "declined",
        };
        write!(f, "{}", s)
    }
}

/// 呼叫统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallStatistics {
    pub total_calls: usize,
    pub completed_calls: usize,
    pub failed_calls: usize,
    /// 完成率（百分比）
    pub success_rate: f64,
    /// 非零通话时长的平均值（秒）
    pub average_duration: f64,
    pub by_status: BTreeMap<String, usize>,
}

impl CallStatistics {
    pub fn from_records(records: &[CallRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total = records.len();
        let completed = records
            .iter()
            .filter(|c| c.status == CallStatus::Completed)
            .count();
        let failed = records
            .iter()
            .filter(|c| c.status == CallStatus::Failed)
            .count();

        let durations: Vec<u32> = records
            .iter()
            .filter_map(|c| c.duration_secs)
            .filter(|d| *d > 0)
            .collect();
        let average_duration = if durations.is_empty() {
            0.0
        } else {
            durations.iter().map(|d| *d as f64).sum::<f64>() / durations.len() as f64
        };

        let mut by_status = BTreeMap::new();
        for record in records {
            *by_status.entry(record.status.to_string()).or_insert(0) += 1;
        }

        Self {
            total_calls: total,
            completed_calls: completed,
            failed_calls: failed,
            success_rate: completed as f64 / total as f64 * 100.0,
            average_duration,
            by_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: CallStatus, duration: Option<u32>) -> CallRecord {
        let mut r = CallRecord::new(Uuid::new_v4(), "Clinic".into(), "2125550100".into());
        r.status = status;
        r.duration_secs = duration;
        r
    }

    #[test]
    fn test_statistics_empty() {
        let stats = CallStatistics::from_records(&[]);
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert!(stats.by_status.is_empty());
    }

    #[test]
    fn test_statistics_counts_and_average() {
        let records = vec![
            record(CallStatus::Completed, Some(180)),
            record(CallStatus::Completed, Some(45)),
            record(CallStatus::NoAnswer, Some(0)),
            record(CallStatus::Failed, None),
        ];
        let stats = CallStatistics::from_records(&records);

        assert_eq!(stats.total_calls, 4);
        assert_eq!(stats.completed_calls, 2);
        assert_eq!(stats.failed_calls, 1);
        assert_eq!(stats.success_rate, 50.0);
        // zero durations are ignored
        assert_eq!(stats.average_duration, 112.5);
        assert_eq!(stats.by_status.get("completed"), Some(&2));
        assert_eq!(stats.by_status.get("no_answer"), Some(&1));
    }
}
