// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::VoiceSettings;
use crate::domain::models::call::{CallRecord, CallStatus};
use crate::domain::services::call_service::{CallPlacement, VoiceProvider};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Twilio语音服务商
///
/// 以表单POST调用 `Accounts/{sid}/Calls.json`，TwiML朗读呼叫脚本并开启录音
pub struct TwilioVoiceProvider {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base_url: String,
    recording_status_callback: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioCallResponse {
    sid: String,
}

impl TwilioVoiceProvider {
    /// 凭据不完整时返回 `None`
    pub fn from_settings(settings: &VoiceSettings) -> anyhow::Result<Option<Self>> {
        let (Some(account_sid), Some(auth_token), Some(from_number)) = (
            settings.account_sid.clone().filter(|s| !s.is_empty()),
            settings.auth_token.clone().filter(|s| !s.is_empty()),
            settings.from_number.clone().filter(|s| !s.is_empty()),
        ) else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build Twilio HTTP client")?;

        Ok(Some(Self {
            client,
            account_sid,
            auth_token,
            from_number,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            recording_status_callback: settings.recording_status_callback.clone(),
        }))
    }
}

/// 构建朗读脚本的TwiML
pub fn build_twiml(call: &CallRecord) -> String {
    let script = html_escape::encode_text(call.script.as_deref().unwrap_or_default());
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Say voice="alice">Hello, this is an automated call from ScrapeX. {}</Say><Gather numDigits="1" action="/call-response"><Say>Press 1 to speak with someone, or hang up to end the call.</Say></Gather></Response>"#,
        script
    )
}

#[async_trait]
impl VoiceProvider for TwilioVoiceProvider {
    async fn place_call(&self, call: &CallRecord) -> anyhow::Result<CallPlacement> {
        let url = format!(
            "{}/Accounts/{}/Calls.json",
            self.api_base_url, self.account_sid
        );
        let twiml = build_twiml(call);
        let mut form = vec![
            ("To", call.phone_number.as_str()),
            ("From", self.from_number.as_str()),
            ("Twiml", twiml.as_str()),
            ("Record", "true"),
            ("RecordingChannels", "mono"),
        ];
        if let Some(callback) = &self.recording_status_callback {
            form.push(("RecordingStatusCallback", callback.as_str()));
        }

        let response = self
            .client
            .post(url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .context("Failed to send request to Twilio")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Twilio call failed with status {}: {}", status, body));
        }

        let created: TwilioCallResponse = response
            .json()
            .await
            .context("Failed to parse Twilio response")?;

        Ok(CallPlacement {
            status: CallStatus::Initiated,
            provider_call_id: Some(created.sid),
            outcome: None,
            duration_secs: None,
            transcript: None,
            ended: false,
            note: None,
        })
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}
