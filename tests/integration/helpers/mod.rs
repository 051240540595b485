// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use scrapex::application::context::AppContext;
use scrapex::config::settings::Settings;
use scrapex::domain::models::api_key::ApiKey;
use scrapex::engines::reqwest_engine::ReqwestEngine;
use scrapex::infrastructure::voice::simulated::{SimulatedVoiceProvider, SIMULATED_OUTCOMES};
use scrapex::presentation::routes;
use scrapex::workers::manager::WorkerManager;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_API_KEY: &str = "sk_test_integration_key_0123456789";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub ctx: AppContext,
    pub api_key: String,
    pub user_id: Uuid,
    pub worker_manager: WorkerManager,
}

impl TestApp {
    /// 为另一个用户签发密钥
    pub async fn key_for_other_user(&self) -> String {
        let (key, raw) = ApiKey::generate(Uuid::new_v4(), "other".to_string(), None);
        self.ctx.api_keys.create(&key).await.unwrap();
        raw
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.worker_manager.shutdown();
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

/// 使用真实的 reqwest 引擎、固定结果的模拟语音服务商和任务工作器启动应用
pub async fn create_test_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
    let mut settings = Settings::with_defaults().expect("default settings");
    settings.jobs.poll_interval_ms = 20;
    settings.jobs.max_poll_attempts = 250;
    settings.scraper.timeout_secs = 5;
    settings.auth.bootstrap_api_key = Some(TEST_API_KEY.to_string());
    configure(&mut settings);

    let engine = ReqwestEngine::new(&settings.scraper.user_agent).expect("engine");
    let (ctx, queue) = AppContext::with_components(
        settings,
        Arc::new(engine),
        Arc::new(SimulatedVoiceProvider::fixed(SIMULATED_OUTCOMES[0])),
        None,
    );
    let user_id = ctx
        .register_bootstrap_key()
        .await
        .expect("bootstrap key")
        .expect("bootstrap key configured");

    let mut worker_manager = WorkerManager::new();
    worker_manager.start_job_workers(&ctx, queue, 2);

    let server = TestServer::new(routes::routes(ctx.clone())).expect("test server");

    TestApp {
        server,
        ctx,
        api_key: TEST_API_KEY.to_string(),
        user_id,
        worker_manager,
    }
}
