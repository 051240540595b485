// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::job_service::{job_queue, JobQueueReceiver, JobService};
use crate::config::settings::Settings;
use crate::domain::models::api_key::ApiKey;
use crate::domain::models::facility::FacilityData;
use crate::domain::repositories::api_key_repository::ApiKeyRepository;
use crate::domain::repositories::call_repository::CallRepository;
use crate::domain::repositories::job_repository::JobRepository;
use crate::domain::repositories::notification_repository::NotificationRepository;
use crate::domain::repositories::webhook_event_repository::WebhookEventRepository;
use crate::domain::repositories::webhook_repository::WebhookRepository;
use crate::domain::services::analysis_service::AnalysisService;
use crate::domain::services::call_service::{CallService, VoiceProvider};
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::llm_service::{LLMService, LLMServiceTrait};
use crate::domain::services::rate_limiting_service::RateLimitingService;
use crate::domain::services::webhook_service::WebhookDispatcher;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};
use crate::infrastructure::repositories::api_key_repo_impl::ApiKeyRepoImpl;
use crate::infrastructure::repositories::call_repo_impl::CallRepoImpl;
use crate::infrastructure::repositories::job_repo_impl::JobRepoImpl;
use crate::infrastructure::repositories::notification_repo_impl::NotificationRepoImpl;
use crate::infrastructure::repositories::webhook_event_repo_impl::WebhookEventRepoImpl;
use crate::infrastructure::repositories::webhook_repo_impl::WebhookRepoImpl;
use crate::infrastructure::services::rate_limiting_service_impl::RateLimitingServiceImpl;
use crate::infrastructure::voice::provider_from_settings;
use anyhow::Context;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// 应用上下文
///
/// 持有全部仓库与服务，由 HTTP 层和后台工作器共享
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub jobs: JobService,
    pub job_repo: Arc<dyn JobRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub api_keys: Arc<dyn ApiKeyRepository>,
    pub webhooks: Arc<dyn WebhookRepository>,
    pub webhook_events: Arc<dyn WebhookEventRepository>,
    pub dispatcher: WebhookDispatcher,
    pub calls: Arc<CallService>,
    pub analysis: Arc<AnalysisService>,
    pub engine: Arc<dyn ScraperEngine>,
    pub rate_limiter: Arc<dyn RateLimitingService>,
}

impl AppContext {
    /// 根据配置创建上下文，返回上下文和任务队列接收端
    pub fn from_settings(settings: Settings) -> anyhow::Result<(Self, JobQueueReceiver)> {
        let engine = ReqwestEngine::new(&settings.scraper.user_agent)
            .context("Failed to build scraper engine")?;
        let voice = provider_from_settings(&settings.voice)?;
        let llm = LLMService::from_settings(&settings.llm)?
            .map(|service| Arc::new(service) as Arc<dyn LLMServiceTrait>);
        if llm.is_none() {
            info!("LLM API key not configured, using basic analysis");
        }

        Ok(Self::with_components(settings, Arc::new(engine), voice, llm))
    }

    /// 使用指定的抓取引擎、语音服务商和LLM创建上下文
    pub fn with_components(
        settings: Settings,
        engine: Arc<dyn ScraperEngine>,
        voice: Arc<dyn VoiceProvider>,
        llm: Option<Arc<dyn LLMServiceTrait>>,
    ) -> (Self, JobQueueReceiver) {
        let job_repo: Arc<dyn JobRepository> = Arc::new(JobRepoImpl::new());
        let call_repo: Arc<dyn CallRepository> = Arc::new(CallRepoImpl::new());
        let webhooks: Arc<dyn WebhookRepository> = Arc::new(WebhookRepoImpl::new());
        let webhook_events: Arc<dyn WebhookEventRepository> = Arc::new(WebhookEventRepoImpl::new());

        let dispatcher = WebhookDispatcher::new(
            webhooks.clone(),
            webhook_events.clone(),
            settings.webhook.max_retries,
        );
        let calls = CallService::new(call_repo, voice, &settings.compliance.do_not_call)
            .with_webhooks(dispatcher.clone());

        let (tx, rx) = job_queue(settings.jobs.queue_capacity);
        let jobs = JobService::new(job_repo.clone(), tx, &settings.jobs);

        let ctx = Self {
            jobs,
            job_repo,
            notifications: Arc::new(NotificationRepoImpl::new()),
            api_keys: Arc::new(ApiKeyRepoImpl::new()),
            webhooks,
            webhook_events,
            dispatcher,
            calls: Arc::new(calls),
            analysis: Arc::new(AnalysisService::new(llm)),
            engine,
            rate_limiter: Arc::new(RateLimitingServiceImpl::new(
                settings.rate_limiting.default_rpm,
            )),
            settings: Arc::new(settings),
        };
        (ctx, rx)
    }

    /// 注册配置中的初始API密钥，返回其所属用户
    pub async fn register_bootstrap_key(&self) -> anyhow::Result<Option<Uuid>> {
        let Some(raw) = self
            .settings
            .auth
            .bootstrap_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
        else {
            return Ok(None);
        };
        let user_id = match self.settings.auth.bootstrap_user_id.as_deref() {
            Some(id) => Uuid::parse_str(id).context("Invalid auth.bootstrap_user_id")?,
            None => Uuid::new_v4(),
        };

        let key = ApiKey::from_raw(user_id, "bootstrap".to_string(), raw, None);
        self.api_keys.create(&key).await?;
        info!(%user_id, prefix = %key.prefix, "Registered bootstrap API key");
        Ok(Some(user_id))
    }

    /// 抓取页面并提取机构信息
    pub async fn scrape_facility(&self, url: &str) -> Result<FacilityData, EngineError> {
        let request = ScrapeRequest::new(url, Duration::from_secs(self.settings.scraper.timeout_secs));
        let response = self.engine.scrape(&request).await?;
        counter!("pages_fetched_total", "engine" => self.engine.name()).increment(1);
        Ok(ExtractionService::extract_facility(url, &response.content))
    }
}
