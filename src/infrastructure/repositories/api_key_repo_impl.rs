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

use crate::domain::models::api_key::ApiKey;
use crate::domain::repositories::api_key_repository::ApiKeyRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// API密钥仓库实现
///
/// 以密钥摘要为索引
#[derive(Clone, Default)]
pub struct ApiKeyRepoImpl {
    keys: Arc<DashMap<String, ApiKey>>,
}

impl ApiKeyRepoImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiKeyRepository for ApiKeyRepoImpl {
    async fn create(&self, key: &ApiKey) -> Result<ApiKey, RepositoryError> {
        if self.keys.contains_key(&key.key_hash) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.keys.insert(key.key_hash.clone(), key.clone());
        Ok(key.clone())
    }

    async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, RepositoryError> {
        Ok(self.keys.get(key_hash).map(|k| k.clone()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<ApiKey>, RepositoryError> {
        let mut keys: Vec<ApiKey> = self
            .keys
            .iter()
            .filter(|k| k.user_id == user_id)
            .map(|k| k.clone())
            .collect();
        keys.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(keys)
    }

    async fn touch(&self, id: Uuid) -> Result<(), RepositoryError> {
        for mut entry in self.keys.iter_mut() {
            if entry.id == id {
                entry.last_used_at = Some(Utc::now());
                return Ok(());
            }
        }
        Err(RepositoryError::NotFound)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, RepositoryError> {
        let hash = self
            .keys
            .iter()
            .find(|k| k.id == id && k.user_id == user_id)
            .map(|k| k.key().clone());
        Ok(match hash {
            Some(hash) => self.keys.remove(&hash).is_some(),
            None => false,
        })
    }
}
