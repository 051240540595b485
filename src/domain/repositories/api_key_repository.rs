// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::api_key::ApiKey;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// API密钥仓库特质
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    async fn create(&self, key: &ApiKey) -> Result<ApiKey, RepositoryError>;
    /// 根据密钥摘要查找
    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, RepositoryError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ApiKey>, RepositoryError>;
    /// 记录最近使用时间
    async fn touch(&self, id: Uuid) -> Result<(), RepositoryError>;
    /// 删除用户的密钥，返回是否存在
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError>;
}
