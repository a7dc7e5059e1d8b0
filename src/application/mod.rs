// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// - 数据传输对象（dto）：操作者提交的请求
/// - 进度报告（progress）：把运行进度推送到日志、SSE 或测试收集器
/// - 用例（use_cases）：批处理运行器
pub mod dto;
pub mod progress;
pub mod use_cases;
