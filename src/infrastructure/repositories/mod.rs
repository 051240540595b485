// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 领域层仓库接口的进程内实现，数据保存在 `DashMap` 中
pub mod api_key_repo_impl;
pub mod call_repo_impl;
pub mod job_repo_impl;
pub mod notification_repo_impl;
pub mod webhook_event_repo_impl;
pub mod webhook_repo_impl;
