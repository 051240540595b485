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

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、任务、合规、LLM、语音、Webhook、速率限制等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 任务处理配置
    pub jobs: JobSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 呼叫合规配置
    pub compliance: ComplianceSettings,
    /// LLM 配置
    pub llm: LlmSettings,
    /// 语音服务配置
    pub voice: VoiceSettings,
    /// Webhook 配置
    pub webhook: WebhookSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
    /// 认证配置
    #[serde(default)]
    pub auth: AuthSettings,
    /// 日志配置
    pub logging: LoggingSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 任务处理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct JobSettings {
    /// 后台工作器数量
    pub workers: usize,
    /// 任务队列容量
    pub queue_capacity: usize,
    /// 等待任务完成时的轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 等待任务完成时的最大轮询次数
    pub max_poll_attempts: u32,
    /// 周期任务调度器的检查间隔（秒）
    pub scheduler_interval_secs: u64,
    /// 任务列表默认返回条数
    pub default_list_limit: usize,
}

/// 抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
}

/// 呼叫合规配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceSettings {
    /// 禁止呼叫号码列表
    pub do_not_call: Vec<String>,
}

/// LLM配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API密钥，未配置时使用基础分析
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// API基础URL
    pub api_base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 语音服务配置设置
///
/// 未配置账户凭据时使用模拟呼叫
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceSettings {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    /// API基础URL
    pub api_base_url: String,
    /// 录音状态回调地址
    pub recording_status_callback: Option<String>,
}

/// Webhook配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookSettings {
    /// 投递超时时间（秒）
    pub timeout_secs: u64,
    /// 最大重试次数
    pub max_retries: u32,
    /// 投递工作器轮询间隔（秒）
    pub worker_interval_secs: u64,
    /// 每批处理的事件数
    pub batch_size: usize,
}

/// 速率限制配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 默认每分钟请求数限制
    pub default_rpm: u32,
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    pub enabled: bool,
    pub listen_addr: String,
}

/// 认证配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    /// 启动时注册的初始API密钥
    pub bootstrap_api_key: Option<String>,
    /// 初始API密钥所属用户
    pub bootstrap_user_id: Option<String>,
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// 是否输出JSON格式日志
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `SCRAPEX__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SCRAPEX").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 从指定文件加载配置（不读取环境变量）
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(path))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值的配置
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("jobs.workers", 4)?
            .set_default("jobs.queue_capacity", 1024)?
            .set_default("jobs.poll_interval_ms", 2000)?
            .set_default("jobs.max_poll_attempts", 30)?
            .set_default("jobs.scheduler_interval_secs", 60)?
            .set_default("jobs.default_list_limit", 50)?
            .set_default("scraper.timeout_secs", 10)?
            .set_default(
                "scraper.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            )?
            .set_default("compliance.do_not_call", Vec::<String>::new())?
            .set_default("llm.model", "gpt-4.1-mini")?
            .set_default("llm.api_base_url", "https://api.openai.com/v1")?
            .set_default("llm.timeout_secs", 60)?
            .set_default("voice.api_base_url", "https://api.twilio.com/2010-04-01")?
            .set_default("webhook.timeout_secs", 10)?
            .set_default("webhook.max_retries", 5)?
            .set_default("webhook.worker_interval_secs", 5)?
            .set_default("webhook.batch_size", 50)?
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.default_rpm", 100)?
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")?
            .set_default("logging.json", false)
    }

    /// 服务监听地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
