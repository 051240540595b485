// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// - 认证（auth_middleware）：Bearer API密钥校验
/// - 限流（rate_limit_middleware）：按用户的每分钟请求数限制
pub mod auth_middleware;
pub mod rate_limit_middleware;
