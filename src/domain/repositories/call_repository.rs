// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::call::CallRecord;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 呼叫记录仓库特质
#[async_trait]
pub trait CallRepository: Send + Sync {
    async fn create(&self, call: &CallRecord) -> Result<CallRecord, RepositoryError>;
    async fn update(&self, call: &CallRecord) -> Result<CallRecord, RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallRecord>, RepositoryError>;
    /// 按创建时间倒序列出用户的呼叫，可按机构名过滤
    async fn find_by_user(
        &self,
        user_id: Uuid,
        facility_name: Option<&str>,
    ) -> Result<Vec<CallRecord>, RepositoryError>;
}
