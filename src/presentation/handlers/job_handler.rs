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

use crate::application::context::AppContext;
use crate::application::dto::job_request::{
    BulkJobRequestDto, BulkJobResponseDto, CreateJobRequestDto, JobListQueryDto,
    JobStatusQueryDto,
};
use crate::presentation::errors::{validate_request, AppError};
use crate::presentation::middleware::auth_middleware::AuthUser;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::json;
use uuid::Uuid;

/// 创建抓取或分析任务
pub async fn create_job(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<CreateJobRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let job = ctx.jobs.create(auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "job": job })),
    ))
}

/// 校验URL文本块并创建批量抓取任务
pub async fn create_bulk_job(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Json(request): Json<BulkJobRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&request)?;
    let (job, validation) = ctx.jobs.create_bulk(auth.user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(BulkJobResponseDto {
            success: true,
            job,
            validation,
        }),
    ))
}

pub async fn list_jobs(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<JobListQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    validate_request(&query)?;
    let jobs = ctx.jobs.list(auth.user_id, query.limit).await?;
    Ok(Json(json!({ "success": true, "count": jobs.len(), "jobs": jobs })))
}

/// 查询任务状态，`wait=true` 时轮询直到任务结束
pub async fn get_job(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<JobStatusQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let job = if query.wait {
        ctx.jobs.wait_for_completion(auth.user_id, id).await?
    } else {
        ctx.jobs.get(auth.user_id, id).await?
    };
    Ok(Json(json!({ "success": true, "job": job })))
}

pub async fn delete_job(
    Extension(ctx): Extension<AppContext>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    ctx.jobs.delete(auth.user_id, id).await?;
    Ok(Json(json!({ "success": true })))
}
