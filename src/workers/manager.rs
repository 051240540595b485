// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::context::AppContext;
use crate::application::job_service::JobQueueReceiver;
use crate::infrastructure::services::webhook_service_impl::WebhookServiceImpl;
use crate::workers::job_worker::{JobWorker, SharedJobQueue};
use crate::workers::scheduler::RecurringJobScheduler;
use crate::workers::webhook_worker::WebhookWorker;
use crate::workers::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 启动任务工作器池、周期任务调度器和Webhook投递工作器，并在关闭时统一终止
#[derive(Default)]
pub struct WorkerManager {
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动全部后台工作器
    pub fn start_all(&mut self, ctx: &AppContext, queue: JobQueueReceiver) -> anyhow::Result<()> {
        let settings = ctx.settings.clone();
        self.start_job_workers(ctx, queue, settings.jobs.workers);

        self.spawn(Arc::new(RecurringJobScheduler::new(
            ctx.job_repo.clone(),
            ctx.jobs.clone(),
            Duration::from_secs(settings.jobs.scheduler_interval_secs),
        )));

        let sender = WebhookServiceImpl::new(Duration::from_secs(settings.webhook.timeout_secs))?;
        self.spawn(Arc::new(WebhookWorker::new(
            ctx.webhook_events.clone(),
            ctx.webhooks.clone(),
            Arc::new(sender),
            Duration::from_secs(settings.webhook.worker_interval_secs),
            settings.webhook.batch_size,
        )));

        Ok(())
    }

    /// 启动指定数量的任务工作器，共享同一个队列
    ///
    /// # 参数
    ///
    /// * `count` - 要启动的工作器数量，至少为 1
    pub fn start_job_workers(&mut self, ctx: &AppContext, queue: JobQueueReceiver, count: usize) {
        let queue: SharedJobQueue = Arc::new(Mutex::new(queue));
        for worker_id in 0..count.max(1) {
            let worker = JobWorker::new(ctx.clone(), worker_id);
            let queue = queue.clone();
            self.handles.push(tokio::spawn(async move {
                worker.run(queue).await;
            }));
        }
        info!("Started {} job workers", count.max(1));
    }

    /// 在独立任务中运行周期性工作器
    pub fn spawn(&mut self, worker: Arc<dyn Worker>) {
        self.handles.push(tokio::spawn(async move {
            if let Err(e) = worker.run().await {
                error!("Worker {} stopped: {}", worker.name(), e);
            }
        }));
    }

    /// 等待关闭信号并关闭工作器
    pub async fn wait_for_shutdown(&mut self) {
        match signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(err) => error!("Unable to listen for shutdown signal: {}", err),
        }
        self.shutdown();
    }

    pub fn shutdown(&mut self) {
        info!("Shutting down workers...");
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Workers shut down successfully");
    }
}
