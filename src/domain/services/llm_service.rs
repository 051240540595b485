// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::LlmSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMServiceTrait: Send + Sync {
    /// 发送单轮提示并返回模型输出的文本
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<(String, TokenUsage)>;
}

/// LLM服务 - 处理与OpenAI兼容接口的交互
///
/// # 配置
///
/// 通过 `[llm]` 配置段设置：
/// - `api_key` - API密钥
/// - `model` - 模型名称
/// - `api_base_url` - API基础URL
/// - `timeout_secs` - 请求超时
pub struct LLMService {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base_url: String,
}

#[async_trait]
impl LLMServiceTrait for LLMService {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<(String, TokenUsage)> {
        LLMService::complete(self, prompt, max_tokens).await
    }
}

impl LLMService {
    /// 根据配置创建服务；未配置API密钥时返回 `None`
    pub fn from_settings(settings: &LlmSettings) -> Result<Option<Self>> {
        let Some(api_key) = settings.api_key.clone().filter(|k| !k.is_empty()) else {
            return Ok(None);
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build LLM HTTP client")?;

        Ok(Some(Self {
            client,
            api_key,
            model: settings.model.clone(),
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 调用 chat completions 接口
    ///
    /// # 错误
    /// * 网络错误或非2xx响应
    /// * 响应中缺少 `choices[0].message.content`
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<(String, TokenUsage)> {
        let request_body = json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let url = format!("{}/chat/completions", self.api_base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to LLM API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "LLM API returned error: {} - {}",
                status,
                error_text
            ));
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse LLM API response")?;

        let usage = if let Some(usage_val) = body.get("usage") {
            TokenUsage {
                prompt_tokens: usage_val["prompt_tokens"].as_u64().unwrap_or(0) as u32,
                completion_tokens: usage_val["completion_tokens"].as_u64().unwrap_or(0) as u32,
                total_tokens: usage_val["total_tokens"].as_u64().unwrap_or(0) as u32,
            }
        } else {
            TokenUsage::default()
        };

        match body["choices"][0]["message"]["content"].as_str() {
            Some(content) => Ok((content.to_string(), usage)),
            None => Err(anyhow::anyhow!("Invalid response format from LLM API")),
        }
    }
}
