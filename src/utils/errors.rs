// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 仓库层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// 服务层错误类型
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("upstream service error: {0}")]
    Upstream(String),

    #[error("job queue unavailable")]
    QueueUnavailable,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Worker错误类型
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Queue closed")]
    QueueClosed,
}
