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

use crate::domain::models::job::{JobStatus, ScrapeJob};
use crate::domain::repositories::job_repository::JobRepository;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 任务仓库实现
///
/// 基于 `DashMap` 的进程内存储
#[derive(Clone, Default)]
pub struct JobRepoImpl {
    jobs: Arc<DashMap<Uuid, ScrapeJob>>,
}

impl JobRepoImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for JobRepoImpl {
    async fn create(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
        if self.jobs.contains_key(&job.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        self.jobs.insert(job.id, job.clone());
        Ok(job.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ScrapeJob>, RepositoryError> {
        Ok(self.jobs.get(&id).map(|j| j.clone()))
    }

    async fn update(&self, job: &ScrapeJob) -> Result<ScrapeJob, RepositoryError> {
        match self.jobs.get_mut(&job.id) {
            Some(mut entry) => {
                *entry = job.clone();
                Ok(job.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.jobs.remove(&id).is_some())
    }

    async fn find_by_user(&self, user_id: Uuid, limit: usize) -> Result<Vec<ScrapeJob>, RepositoryError> {
        let mut jobs: Vec<ScrapeJob> = self
            .jobs
            .iter()
            .filter(|j| j.user_id == user_id)
            .map(|j| j.clone())
            .collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);
        Ok(jobs)
    }

    async fn find_due_recurring(&self, now: DateTime<Utc>) -> Result<Vec<ScrapeJob>, RepositoryError> {
        Ok(self
            .jobs
            .iter()
            .filter(|j| j.status != JobStatus::Processing && j.is_due(now))
            .map(|j| j.clone())
            .collect())
    }
}
