// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层依赖的外部能力抽象，具体实现由基础设施层提供：
/// - 上传器（uploader）：把 PDF 内容写入云存储文件夹
pub mod uploader;
