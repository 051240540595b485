// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::call::{CallRecord, CallStatus};
use crate::domain::services::call_service::{CallPlacement, VoiceProvider};
use async_trait::async_trait;

/// 模拟呼叫结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedOutcome {
    pub status: CallStatus,
    pub outcome: &'static str,
    pub duration_secs: u32,
}

pub const SIMULATED_OUTCOMES: [SimulatedOutcome; 4] = [
    SimulatedOutcome {
        status: CallStatus::Completed,
        outcome: "interested",
        duration_secs: 180,
    },
    SimulatedOutcome {
        status: CallStatus::Completed,
        outcome: "not_interested",
        duration_secs: 45,
    },
    SimulatedOutcome {
        status: CallStatus::NoAnswer,
        outcome: "no_answer",
        duration_secs: 0,
    },
    SimulatedOutcome {
        status: CallStatus::Voicemail,
        outcome: "voicemail",
        duration_secs: 30,
    },
];

const SIMULATED_NOTE: &str = "Simulated call (Twilio not configured)";

/// 模拟语音服务商
///
/// 随机选取一个预设结果，可固定结果用于测试
#[derive(Debug, Clone, Default)]
pub struct SimulatedVoiceProvider {
    fixed: Option<SimulatedOutcome>,
}

impl SimulatedVoiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fixed(outcome: SimulatedOutcome) -> Self {
        Self {
            fixed: Some(outcome),
        }
    }

    fn pick(&self) -> SimulatedOutcome {
        self.fixed
            .unwrap_or_else(|| SIMULATED_OUTCOMES[rand::random_range(0..SIMULATED_OUTCOMES.len())])
    }
}

/// 生成示例通话记录
pub fn sample_transcript(call: &CallRecord) -> String {
    format!(
        "CALLER: Hello, this is an automated call from ScrapeX regarding {}.\n\n\
         CALLER: {}\n\n\
         RECIPIENT: [Response recorded]\n\n\
         CALLER: Thank you for your time. Have a great day!\n",
        call.facility_name,
        call.script.as_deref().unwrap_or_default()
    )
}

#[async_trait]
impl VoiceProvider for SimulatedVoiceProvider {
    async fn place_call(&self, call: &CallRecord) -> anyhow::Result<CallPlacement> {
        let outcome = self.pick();
        let transcript = (outcome.status == CallStatus::Completed).then(|| sample_transcript(call));

        Ok(CallPlacement {
            status: outcome.status,
            provider_call_id: None,
            outcome: Some(outcome.outcome.to_string()),
            duration_secs: Some(outcome.duration_secs),
            transcript,
            ended: true,
            note: Some(SIMULATED_NOTE.to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
