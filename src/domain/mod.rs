// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：链接、文件名、传输结果和运行状态
/// - 仓库接口（repositories）：上传器抽象接口
/// - 服务（services）：链接提取、名称解析和文件夹ID提取
///
/// 领域层不依赖于任何具体的网络或存储实现。
pub mod models;
pub mod repositories;
pub mod services;
