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

use scrapex::application::context::AppContext;
use scrapex::config::settings::Settings;
use scrapex::infrastructure::metrics;
use scrapex::presentation::routes;
use scrapex::utils::telemetry;
use scrapex::workers::manager::WorkerManager;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(settings.logging.json);
    info!("Starting scrapex...");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.listen_addr);
    }

    // 3. Initialize components
    let addr = settings.bind_addr();
    let (ctx, queue) = AppContext::from_settings(settings)?;
    if ctx.register_bootstrap_key().await?.is_none() {
        warn!("No bootstrap API key configured; every protected route will return 401");
    }
    info!(
        "Voice provider: {}, LLM analysis: {}",
        ctx.calls.provider_name(),
        ctx.analysis.has_llm()
    );

    // 4. Start workers
    let mut worker_manager = WorkerManager::new();
    worker_manager.start_all(&ctx, queue)?;

    // 5. Start HTTP server
    let app = routes::routes(ctx);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            worker_manager.wait_for_shutdown().await;
        })
        .await?;

    info!("Server stopped");
    Ok(())
}
