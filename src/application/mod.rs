// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 包含请求DTO、任务服务以及组装全部依赖的应用上下文
pub mod context;
pub mod dto;
pub mod job_service;
