// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP处理器模块
pub mod api_key_handler;
pub mod call_handler;
pub mod job_handler;
pub mod notification_handler;
pub mod tool_handler;
pub mod webhook_handler;
