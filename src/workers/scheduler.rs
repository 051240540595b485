// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::job_service::JobService;
use crate::domain::repositories::job_repository::JobRepository;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// 周期任务调度器
///
/// 每个周期检查到期的周期任务，重置为待执行、推进下次执行时间并重新入队
pub struct RecurringJobScheduler {
    repository: Arc<dyn JobRepository>,
    jobs: JobService,
    interval: Duration,
}

impl RecurringJobScheduler {
    pub fn new(repository: Arc<dyn JobRepository>, jobs: JobService, interval: Duration) -> Self {
        Self {
            repository,
            jobs,
            interval,
        }
    }

    /// 执行一次调度，返回重新入队的任务数
    pub async fn tick(&self, now: DateTime<Utc>) -> Result<usize, WorkerError> {
        let due = self.repository.find_due_recurring(now).await?;
        let mut requeued = 0;

        for mut job in due {
            job.reschedule(now);
            self.repository.update(&job).await?;
            self.jobs
                .enqueue(job.id)
                .await
                .map_err(|_| WorkerError::QueueClosed)?;
            requeued += 1;
        }

        Ok(requeued)
    }
}

#[async_trait]
impl Worker for RecurringJobScheduler {
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Recurring job scheduler started");
        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.tick(Utc::now()).await {
                Ok(count) => {
                    if count > 0 {
                        info!("Re-queued {} recurring jobs", count);
                    }
                }
                Err(WorkerError::QueueClosed) => return Err(WorkerError::QueueClosed),
                Err(e) => error!("Failed to schedule recurring jobs: {}", e),
            }
        }
    }

    fn name(&self) -> &str {
        "recurring_job_scheduler"
    }
}
