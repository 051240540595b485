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

use crate::domain::models::job::{ExtractionMode, JobType, Recurrence, ScrapeJob};
use crate::domain::services::url_validator::UrlValidationReport;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 创建任务请求DTO
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateJobRequestDto {
    /// 任务类型，默认单URL抓取
    #[serde(default)]
    pub job_type: JobType,

    /// 抓取目标（scrape 类型必填，可省略协议）
    #[validate(length(min = 1, max = 2048))]
    pub url: Option<String>,

    /// 批量抓取目标（bulk_scrape 类型必填）
    #[validate(length(min = 1, max = 500))]
    pub urls: Option<Vec<String>>,

    /// 提取模式
    #[serde(default)]
    pub extraction_mode: ExtractionMode,

    /// 周期执行
    pub recurrence: Option<Recurrence>,

    /// 完成后自动呼叫
    #[serde(default)]
    pub auto_call: bool,

    /// 分析任务的输入：单个机构数据或数组
    pub facility_data: Option<serde_json::Value>,
}

/// 批量抓取请求DTO
///
/// `text` 为换行分隔的URL文本块
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct BulkJobRequestDto {
    #[validate(length(min = 1, max = 200000))]
    pub text: String,

    #[serde(default)]
    pub extraction_mode: ExtractionMode,

    pub recurrence: Option<Recurrence>,

    #[serde(default)]
    pub auto_call: bool,
}

/// 批量抓取响应
#[derive(Debug, Serialize)]
pub struct BulkJobResponseDto {
    pub success: bool,
    pub job: ScrapeJob,
    pub validation: UrlValidationReport,
}

/// 任务列表查询参数
#[derive(Debug, Default, Deserialize, Validate)]
pub struct JobListQueryDto {
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<usize>,
}

/// 任务详情查询参数
#[derive(Debug, Default, Deserialize)]
pub struct JobStatusQueryDto {
    /// 是否轮询直到任务结束
    #[serde(default)]
    pub wait: bool,
}
