// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use chrono::Utc;
use metrics::{counter, histogram};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::application::context::AppContext;
use crate::application::job_service::{parse_facility_input, JobQueueReceiver};
use crate::domain::models::analysis::FacilityAnalysis;
use crate::domain::models::facility::FacilityData;
use crate::domain::models::job::{ExtractionMode, JobType, ScrapeJob};
use crate::domain::models::notification::Notification;
use crate::domain::models::webhook::WebhookEventType;
use crate::domain::services::analysis_service::{basic_analysis, score_leads};
use crate::domain::services::call_service::{CallOutcome, CallRequest};
use crate::domain::services::industry_classifier::classify_industry;
use crate::utils::errors::WorkerError;
use crate::utils::url_utils::ensure_scheme;

/// 共享的任务队列接收端
pub type SharedJobQueue = Arc<Mutex<JobQueueReceiver>>;

/// 任务执行结果
struct JobOutput {
    result: Value,
    summary: String,
    /// 抓取到的机构及其分析，用于自动呼叫
    facilities: Vec<(FacilityData, Option<FacilityAnalysis>)>,
}

/// 任务工作器
///
/// 从共享队列中取出任务ID并执行抓取、批量抓取或分析任务
pub struct JobWorker {
    ctx: AppContext,
    worker_id: usize,
}

impl JobWorker {
    pub fn new(ctx: AppContext, worker_id: usize) -> Self {
        Self { ctx, worker_id }
    }

    /// 运行工作器，直到队列关闭
    pub async fn run(&self, queue: SharedJobQueue) {
        info!("Job worker {} started", self.worker_id);

        loop {
            let next = { queue.lock().await.recv().await };
            let Some(job_id) = next else {
                break;
            };
            if let Err(e) = self.process_job(job_id).await {
                error!("Error processing job {}: {}", job_id, e);
            }
        }

        info!("Job worker {} stopped: queue closed", self.worker_id);
    }

    /// 执行单个任务
    ///
    /// 非 pending 状态的任务（已被其他工作器处理或已删除）被跳过
    #[instrument(skip(self), fields(worker_id = self.worker_id))]
    pub async fn process_job(&self, job_id: Uuid) -> Result<(), WorkerError> {
        let Some(mut job) = self.ctx.job_repo.find_by_id(job_id).await? else {
            warn!("Job no longer exists");
            return Ok(());
        };
        if job.start().is_err() {
            debug!(status = %job.status, "Skipping job that is not pending");
            return Ok(());
        }
        self.ctx.job_repo.update(&job).await?;
        info!(job_type = %job.job_type, "Processing job");

        let start = Instant::now();
        let outcome = match job.job_type {
            JobType::Scrape => self.run_scrape(&job).await,
            JobType::BulkScrape => self.run_bulk(&job).await,
            JobType::Analysis => self.run_analysis(&job).await,
        };
        histogram!("job_duration_seconds", "job_type" => job.job_type.to_string())
            .record(start.elapsed().as_secs_f64());

        match outcome {
            Ok(output) => {
                job.complete(output.result.clone())
                    .map_err(|e| WorkerError::ServiceError(e.to_string()))?;
                self.ctx.job_repo.update(&job).await?;
                counter!("jobs_completed_total", "job_type" => job.job_type.to_string())
                    .increment(1);
                info!("Job completed");

                self.notify(&job, "Scrape job completed", &output.summary).await;
                self.publish(
                    &job,
                    WebhookEventType::JobCompleted,
                    json!({
                        "job_id": job.id,
                        "job_type": job.job_type,
                        "status": job.status,
                        "result": output.result,
                    }),
                )
                .await;

                if job.auto_call {
                    self.auto_call(&job, output.facilities).await;
                }
            }
            Err(e) => {
                let message = e.to_string();
                error!("Job failed: {}", message);
                job.fail(message.clone())
                    .map_err(|e| WorkerError::ServiceError(e.to_string()))?;
                self.ctx.job_repo.update(&job).await?;
                counter!("jobs_failed_total", "job_type" => job.job_type.to_string())
                    .increment(1);

                self.notify(&job, "Scrape job failed", &message).await;
                self.publish(
                    &job,
                    WebhookEventType::JobFailed,
                    json!({
                        "job_id": job.id,
                        "job_type": job.job_type,
                        "status": job.status,
                        "error": message,
                    }),
                )
                .await;
            }
        }

        Ok(())
    }

    async fn scrape_one(
        &self,
        url: &str,
        mode: ExtractionMode,
    ) -> Result<(FacilityData, Value, Option<FacilityAnalysis>), WorkerError> {
        let facility = self
            .ctx
            .scrape_facility(url)
            .await
            .map_err(|e| WorkerError::FetchError(format!("{}: {}", url, e)))?;
        let industry = classify_industry(&facility.text);
        let analysis = match mode {
            ExtractionMode::Ai => Some(self.ctx.analysis.analyze_facility(&facility).await),
            ExtractionMode::Standard => None,
        };

        let entry = json!({
            "url": url,
            "facility": facility,
            "industry": industry,
            "analysis": analysis,
        });
        Ok((facility, entry, analysis))
    }

    async fn run_scrape(&self, job: &ScrapeJob) -> Result<JobOutput, WorkerError> {
        let url = job
            .target_url
            .as_deref()
            .ok_or_else(|| WorkerError::ServiceError("Scrape job has no target URL".to_string()))?;

        let (facility, entry, analysis) = self.scrape_one(url, job.extraction_mode).await?;
        Ok(JobOutput {
            summary: format!("Scraped {}", facility.display_name()),
            result: entry,
            facilities: vec![(facility, analysis)],
        })
    }

    /// 顺序抓取每个URL，单个URL的错误记录在结果中
    async fn run_bulk(&self, job: &ScrapeJob) -> Result<JobOutput, WorkerError> {
        let mut results = Vec::with_capacity(job.urls.len());
        let mut facilities = Vec::new();
        let mut analyses = Vec::new();
        let mut failed = 0usize;

        for raw in &job.urls {
            let url = ensure_scheme(raw);
            match self.scrape_one(&url, job.extraction_mode).await {
                Ok((facility, entry, analysis)) => {
                    results.push(entry);
                    if let Some(analysis) = &analysis {
                        analyses.push(analysis.clone());
                    }
                    facilities.push((facility, analysis));
                }
                Err(e) => {
                    warn!("Bulk scrape of {} failed: {}", url, e);
                    failed += 1;
                    results.push(json!({ "url": url, "error": e.to_string() }));
                }
            }
        }

        let total = job.urls.len();
        let succeeded = total - failed;
        let mut result = json!({
            "results": results,
            "total": total,
            "succeeded": succeeded,
            "failed": failed,
        });
        if !analyses.is_empty() {
            result["leads"] = json!(score_leads(&analyses));
        }

        Ok(JobOutput {
            summary: format!("Bulk scrape finished: {} of {} sites scraped", succeeded, total),
            result,
            facilities,
        })
    }

    async fn run_analysis(&self, job: &ScrapeJob) -> Result<JobOutput, WorkerError> {
        let input = job
            .input
            .as_ref()
            .ok_or_else(|| WorkerError::ServiceError("Analysis job has no input".to_string()))?;
        let facilities = parse_facility_input(input)
            .map_err(|e| WorkerError::ServiceError(format!("Invalid facility data: {}", e)))?;

        let analyses = self.ctx.analysis.analyze_many(&facilities).await;
        let leads = score_leads(&analyses);

        Ok(JobOutput {
            summary: format!("Analyzed {} facilities", analyses.len()),
            result: json!({ "analyses": analyses, "leads": leads }),
            facilities: Vec::new(),
        })
    }

    async fn notify(&self, job: &ScrapeJob, title: &str, message: &str) {
        let notification = Notification::new(
            job.user_id,
            Some(job.id),
            title.to_string(),
            message.to_string(),
        );
        if let Err(e) = self.ctx.notifications.create(&notification).await {
            error!("Failed to create notification: {}", e);
        }
    }

    async fn publish(&self, job: &ScrapeJob, event_type: WebhookEventType, data: Value) {
        if let Err(e) = self.ctx.dispatcher.publish(job.user_id, event_type, data).await {
            error!("Failed to queue {} webhook: {}", event_type, e);
        }
    }

    /// 对抓取到电话号码的机构发起自动呼叫
    async fn auto_call(&self, job: &ScrapeJob, facilities: Vec<(FacilityData, Option<FacilityAnalysis>)>) {
        for (facility, analysis) in facilities {
            let Some(phone) = facility.primary_phone() else {
                debug!(facility = facility.display_name(), "No phone number, skipping auto call");
                continue;
            };
            let analysis = analysis.unwrap_or_else(|| basic_analysis(&facility));
            let script = self.ctx.analysis.generate_call_script(&analysis).await;

            let request = CallRequest {
                facility_name: facility.display_name().to_string(),
                phone_number: phone.to_string(),
                script: Some(script),
                job_id: Some(job.id),
                auto_triggered: true,
            };
            match self.ctx.calls.trigger_call(job.user_id, request, Utc::now()).await {
                Ok(CallOutcome::Placed { call, .. }) => {
                    info!(call_id = %call.id, "Auto call placed to {}", call.facility_name)
                }
                Ok(CallOutcome::ProviderFailed { call, error }) => {
                    warn!(call_id = %call.id, "Auto call failed: {}", error)
                }
                Ok(CallOutcome::Rejected { issues, .. }) => {
                    info!("Auto call to {} blocked: {}", facility.display_name(), issues.join(", "))
                }
                Err(e) => error!("Auto call error: {}", e),
            }
        }
    }
}

#[cfg(test)]
#[path = "job_worker_test.rs"]
mod tests;
