// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod api_tests;
pub mod call_flow_test;
pub mod helpers;
pub mod job_flow_test;
pub mod webhook_flow_test;
