// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::job_request::{BulkJobRequestDto, CreateJobRequestDto};
use crate::config::settings::JobSettings;
use crate::domain::models::facility::FacilityData;
use crate::domain::models::job::{ExtractionMode, JobType, ScrapeJob};
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::services::url_validator::{check_url, validate_urls, UrlValidationReport};
use crate::utils::errors::ServiceError;
use crate::utils::url_utils::ensure_scheme;
use metrics::counter;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 任务队列发送端，元素为待执行的任务ID
pub type JobQueueSender = mpsc::Sender<Uuid>;
/// 任务队列接收端
pub type JobQueueReceiver = mpsc::Receiver<Uuid>;

/// 创建任务队列
pub fn job_queue(capacity: usize) -> (JobQueueSender, JobQueueReceiver) {
    mpsc::channel(capacity.max(1))
}

/// 解析分析任务的输入，接受单个对象或数组
pub fn parse_facility_input(value: &Value) -> Result<Vec<FacilityData>, serde_json::Error> {
    match value {
        Value::Array(_) => serde_json::from_value(value.clone()),
        _ => serde_json::from_value(value.clone()).map(|f| vec![f]),
    }
}

/// 任务服务
///
/// 负责任务的创建、查询、删除和入队；所有查询都按所属用户隔离
#[derive(Clone)]
pub struct JobService {
    repo: Arc<dyn JobRepository>,
    queue: JobQueueSender,
    poll_interval: Duration,
    max_poll_attempts: u32,
    default_limit: usize,
}

impl JobService {
    pub fn new(repo: Arc<dyn JobRepository>, queue: JobQueueSender, settings: &JobSettings) -> Self {
        Self {
            repo,
            queue,
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
            max_poll_attempts: settings.max_poll_attempts,
            default_limit: settings.default_list_limit,
        }
    }

    /// 根据请求创建任务并入队
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateJobRequestDto,
    ) -> Result<ScrapeJob, ServiceError> {
        let job = match request.job_type {
            JobType::Scrape => {
                let raw = request.url.as_deref().unwrap_or_default();
                if raw.trim().is_empty() {
                    return Err(ServiceError::Validation(
                        "url is required for scrape jobs".to_string(),
                    ));
                }
                let url = ensure_scheme(raw);
                check_url(&url).map_err(|reason| {
                    ServiceError::Validation(format!("{}: {}", reason, raw.trim()))
                })?;
                ScrapeJob::scrape(user_id, url, request.extraction_mode)
            }
            JobType::BulkScrape => {
                let urls = request.urls.unwrap_or_default();
                let (job, _) = self.bulk_job(user_id, &urls.join("\n"), request.extraction_mode)?;
                job
            }
            JobType::Analysis => {
                let input = request.facility_data.ok_or_else(|| {
                    ServiceError::Validation(
                        "facility_data is required for analysis jobs".to_string(),
                    )
                })?;
                let facilities = parse_facility_input(&input)
                    .map_err(|e| ServiceError::Validation(format!("invalid facility_data: {}", e)))?;
                if facilities.is_empty() {
                    return Err(ServiceError::Validation("facility_data is empty".to_string()));
                }
                ScrapeJob::analysis(user_id, input)
            }
        };

        let job = match request.recurrence {
            Some(recurrence) => job.with_recurrence(recurrence),
            None => job,
        }
        .with_auto_call(request.auto_call);

        self.submit(job).await
    }

    /// 校验URL文本块并创建批量抓取任务
    pub async fn create_bulk(
        &self,
        user_id: Uuid,
        request: BulkJobRequestDto,
    ) -> Result<(ScrapeJob, UrlValidationReport), ServiceError> {
        let (job, report) = self.bulk_job(user_id, &request.text, request.extraction_mode)?;
        let job = match request.recurrence {
            Some(recurrence) => job.with_recurrence(recurrence),
            None => job,
        }
        .with_auto_call(request.auto_call);

        Ok((self.submit(job).await?, report))
    }

    fn bulk_job(
        &self,
        user_id: Uuid,
        text: &str,
        mode: ExtractionMode,
    ) -> Result<(ScrapeJob, UrlValidationReport), ServiceError> {
        // only bare hostnames are rewritten; rejected lines keep the user's text
        let normalized = text.lines().map(ensure_scheme).collect::<Vec<_>>().join("\n");
        let report = validate_urls(&normalized);
        if report.valid.is_empty() {
            return Err(ServiceError::Validation("No valid URLs provided".to_string()));
        }
        Ok((ScrapeJob::bulk(user_id, report.valid.clone(), mode), report))
    }

    async fn submit(&self, job: ScrapeJob) -> Result<ScrapeJob, ServiceError> {
        let job = self.repo.create(&job).await?;
        if let Err(e) = self.enqueue(job.id).await {
            // never leave an unqueued job pending
            self.repo.delete(job.id).await?;
            warn!(job_id = %job.id, "Job queue closed, job discarded");
            return Err(e);
        }
        info!(job_id = %job.id, job_type = %job.job_type, "Job created");
        counter!("jobs_created_total", "job_type" => job.job_type.to_string()).increment(1);
        Ok(job)
    }

    /// 将任务ID放入执行队列
    pub async fn enqueue(&self, job_id: Uuid) -> Result<(), ServiceError> {
        self.queue
            .send(job_id)
            .await
            .map_err(|_| ServiceError::QueueUnavailable)
    }

    /// 获取用户的任务，不属于该用户时视为不存在
    pub async fn get(&self, user_id: Uuid, job_id: Uuid) -> Result<ScrapeJob, ServiceError> {
        match self.repo.find_by_id(job_id).await? {
            Some(job) if job.user_id == user_id => Ok(job),
            _ => Err(ServiceError::NotFound(format!("job {}", job_id))),
        }
    }

    /// 按创建时间倒序列出任务
    pub async fn list(
        &self,
        user_id: Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<ScrapeJob>, ServiceError> {
        let limit = limit.unwrap_or(self.default_limit);
        Ok(self.repo.find_by_user(user_id, limit).await?)
    }

    pub async fn delete(&self, user_id: Uuid, job_id: Uuid) -> Result<(), ServiceError> {
        self.get(user_id, job_id).await?;
        if self.repo.delete(job_id).await? {
            info!(%job_id, "Job deleted");
            Ok(())
        } else {
            Err(ServiceError::NotFound(format!("job {}", job_id)))
        }
    }

    /// 轮询任务直到结束或达到最大轮询次数
    ///
    /// 超过轮询次数时返回最后一次读取到的任务状态
    pub async fn wait_for_completion(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<ScrapeJob, ServiceError> {
        let mut job = self.get(user_id, job_id).await?;
        for attempt in 0..self.max_poll_attempts {
            if job.status.is_terminal() {
                return Ok(job);
            }
            debug!(%job_id, attempt, status = %job.status, "Waiting for job");
            tokio::time::sleep(self.poll_interval).await;
            job = self.get(user_id, job_id).await?;
        }
        Ok(job)
    }
}
