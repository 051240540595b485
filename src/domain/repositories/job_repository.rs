// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::ScrapeJob;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// 任务仓库特质
///
/// 定义抓取任务数据访问接口
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError>;
    /// 更新任务
    async fn update(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError>;
    /// 删除任务，返回是否存在
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
    /// 按创建时间倒序列出用户的任务
    async fn find_by_user(&self, user_id: Uuid, limit: usize) -> Result<Vec<ScrapeJob>, RepositoryError>;
    /// 查找到期的周期任务
    async fn find_due_recurring(&self, now: DateTime<Utc>) -> Result<Vec<ScrapeJob>, RepositoryError>;
}
