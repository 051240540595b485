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

use crate::domain::models::call::CallRecord;
use crate::domain::repositories::call_repository::CallRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 呼叫记录仓库实现
#[derive(Clone, Default)]
pub struct CallRepoImpl {
    calls: Arc<DashMap<Uuid, CallRecord>>,
}

impl CallRepoImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallRepository for CallRepoImpl {
    async fn create(&self, call: &CallRecord) -> Result<CallRecord, RepositoryError> {
        if self.calls.contains_key(&call.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.calls.insert(call.id, call.clone());
        Ok(call.clone())
    }

    async fn update(&self, call: &CallRecord) -> Result<CallRecord, RepositoryError> {
        match self.calls.get_mut(&call.id) {
            Some(mut entry) => {
                *entry = call.clone();
                Ok(call.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<CallRecord>, RepositoryError> {
        Ok(self.calls.get(&id).map(|c| c.clone()))
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        facility_name: Option<&str>,
    ) -> Result<Vec<CallRecord>, RepositoryError> {
        let mut calls: Vec<CallRecord> = self
            .calls
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| facility_name.map(|f| c.facility_name == f).unwrap_or(true))
            .map(|c| c.clone())
            .collect();
        calls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(calls)
    }
}
