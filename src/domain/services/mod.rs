// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 链接提取（link_extractor）：从源页面HTML中找出 PDF 链接
/// - 名称解析（name_resolver）：为每个链接生成安全的目标文件名
/// - 文件夹ID（folder_id）：从文件夹URL中提取目标文件夹标识
pub mod folder_id;
pub mod link_extractor;
pub mod name_resolver;
