// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义 REST 接口的请求与响应结构，请求结构通过 `validator` 校验
pub mod api_key_request;
pub mod call_request;
pub mod job_request;
pub mod notification_query;
pub mod tool_request;
pub mod webhook_request;
