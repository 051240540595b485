// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 抓取任务实体
///
/// 表示一个用户配置的抓取工作单元：单个URL、批量URL或对已抓取数据的分析。
/// 任务归属于唯一的用户，状态按 pending → processing → completed/failed 流转。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeJob {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 所属用户ID
    pub user_id: Uuid,
    /// 任务类型
    pub job_type: JobType,
    /// 单个抓取目标（scrape 类型）
    pub target_url: Option<String>,
    /// 批量抓取目标（bulk_scrape 类型）
    pub urls: Vec<String>,
    /// 提取模式
    pub extraction_mode: ExtractionMode,
    /// 任务状态
    pub status: JobStatus,
    /// 周期执行配置
    pub recurrence: Option<Recurrence>,
    /// 下次计划执行时间
    pub next_run_at: Option<DateTime<Utc>>,
    /// 完成后是否自动发起呼叫
    pub auto_call: bool,
    /// 分析任务的输入数据
    pub input: Option<serde_json::Value>,
    /// 执行结果
    pub result: Option<serde_json::Value>,
    /// 失败原因
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScrapeJob {
    /// 创建单URL抓取任务
    pub fn scrape(user_id: Uuid, url: String, extraction_mode: ExtractionMode) -> Self {
        let mut job = Self::empty(user_id, JobType::Scrape);
        job.target_url = Some(url);
        job.extraction_mode = extraction_mode;
        job
    }

    /// 创建批量抓取任务
    pub fn bulk(user_id: Uuid, urls: Vec<String>, extraction_mode: ExtractionMode) -> Self {
        let mut job = Self::empty(user_id, JobType::BulkScrape);
        job.urls = urls;
        job.extraction_mode = extraction_mode;
        job
    }

    /// 创建分析任务
    pub fn analysis(user_id: Uuid, facility_data: serde_json::Value) -> Self {
        let mut job = Self::empty(user_id, JobType::Analysis);
        job.input = Some(facility_data);
        job
    }

    fn empty(user_id: Uuid, job_type: JobType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            job_type,
            target_url: None,
            urls: Vec::new(),
            extraction_mode: ExtractionMode::default(),
            status: JobStatus::Pending,
            recurrence: None,
            next_run_at: None,
            auto_call: false,
            input: None,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// 设置周期执行，首次计划时间为当前时间加一个周期
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.next_run_at = Some(self.created_at + recurrence.period());
        self.recurrence = Some(recurrence);
        self
    }

    pub fn with_auto_call(mut self, auto_call: bool) -> Self {
        self.auto_call = auto_call;
        self
    }

    /// 进入处理状态
    pub fn start(&mut self) -> Result<(), JobStateError> {
        if self.status != JobStatus::Pending {
            return Err(JobStateError::InvalidTransition {
                from: self.status,
                to: JobStatus::Processing,
            });
        }
        self.status = JobStatus::Processing;
        self.error = None;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// 标记完成并记录结果
    pub fn complete(&mut self, result: serde_json::Value) -> Result<(), JobStateError> {
        self.finish(JobStatus::Completed)?;
        self.result = Some(result);
        Ok(())
    }

    /// 标记失败并记录错误信息
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), JobStateError> {
        self.finish(JobStatus::Failed)?;
        self.error = Some(error.into());
        Ok(())
    }

    fn finish(&mut self, to: JobStatus) -> Result<(), JobStateError> {
        if self.status != JobStatus::Processing {
            return Err(JobStateError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        let now = Utc::now();
        self.status = to;
        self.updated_at = now;
        self.completed_at = Some(now);
        Ok(())
    }

    /// 周期任务是否到期需要重新执行
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.recurrence.is_some()
            && self.status.is_terminal()
            && self.next_run_at.map(|at| at <= now).unwrap_or(false)
    }

    /// 重置为待执行并推进下次计划时间
    pub fn reschedule(&mut self, now: DateTime<Utc>) {
        if let Some(recurrence) = self.recurrence {
            let mut next = self.next_run_at.unwrap_or(now);
            while next <= now {
                next += recurrence.period();
            }
            self.next_run_at = Some(next);
        }
        self.status = JobStatus::Pending;
        self.updated_at = now;
        self.completed_at = None;
    }
}

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// 抓取单个网站
    #[default]
    Scrape,
    /// 批量抓取
    BulkScrape,
    /// 对已抓取数据进行分析
    Analysis,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobType::Scrape => write!(f, "scrape"),
            JobType::BulkScrape => write!(f, "bulk_scrape"),
            JobType::Analysis => write!(f, "analysis"),
        }
    }
}

/// 提取模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// 基于HTML规则的提取
    #[default]
    Standard,
    /// 提取后追加AI分析
    Ai,
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for JobStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(()),
        }
    }
}

/// 周期执行配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Hourly,
    Daily,
    Weekly,
}

impl Recurrence {
    pub fn period(&self) -> Duration {
        match self {
            Recurrence::Hourly => Duration::hours(1),
            Recurrence::Daily => Duration::days(1),
            Recurrence::Weekly => Duration::weeks(1),
        }
    }
}

/// 任务状态转换错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobStateError {
    #[error("Invalid job state transition from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },
}
