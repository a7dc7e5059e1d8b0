// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了一次传输运行中的核心实体，包括：
/// - PDF 链接（pdf_link）：从源页面发现的链接及其目标文件名、目标文件夹
/// - 传输结果（transfer）：单个链接的传输结果以及整次运行的报告
/// - 运行状态（run_state）：批处理运行器的状态机
/// - 进度事件（progress）：推送给操作者的进度通知
pub mod pdf_link;
pub mod progress;
pub mod run_state;
pub mod transfer;
