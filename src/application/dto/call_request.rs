// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::call_service::CallRequest;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// 发起呼叫请求DTO
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TriggerCallRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub facility_name: String,

    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,

    #[validate(length(max = 10000))]
    pub script: Option<String>,

    pub job_id: Option<Uuid>,
}

impl From<TriggerCallRequestDto> for CallRequest {
    fn from(dto: TriggerCallRequestDto) -> Self {
        CallRequest {
            facility_name: dto.facility_name,
            phone_number: dto.phone_number,
            script: dto.script,
            job_id: dto.job_id,
            auto_triggered: false,
        }
    }
}

/// 呼叫历史查询参数
#[derive(Debug, Default, Deserialize)]
pub struct CallHistoryQueryDto {
    pub facility_name: Option<String>,
}
