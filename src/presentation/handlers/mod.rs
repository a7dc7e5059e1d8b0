// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 表单页面、表单提交、SSE 进度推送和 JSON 接口
pub mod transfer_handler;
