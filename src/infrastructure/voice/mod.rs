// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 语音服务商实现
///
/// - Twilio（twilio）：通过 REST API 发起真实呼叫
/// - 模拟（simulated）：未配置凭据时使用的随机结果
pub mod simulated;
pub mod twilio;

use crate::config::settings::VoiceSettings;
use crate::domain::services::call_service::VoiceProvider;
use std::sync::Arc;
use tracing::warn;

/// 根据配置选择语音服务商
pub fn provider_from_settings(settings: &VoiceSettings) -> anyhow::Result<Arc<dyn VoiceProvider>> {
    match twilio::TwilioVoiceProvider::from_settings(settings)? {
        Some(provider) => Ok(Arc::new(provider)),
        None => {
            warn!("Twilio credentials not provided. Call functionality will be simulated.");
            Ok(Arc::new(simulated::SimulatedVoiceProvider::new()))
        }
    }
}
