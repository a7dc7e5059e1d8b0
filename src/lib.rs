// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含批处理运行器、进度报告和请求对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体、链接提取与名称解析服务以及上传器接口
pub mod domain;

/// 引擎模块
///
/// 实现源页面和 PDF 的抓取
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如 Google 认证和各类存储后端
pub mod infrastructure;

/// 表示层模块
///
/// 面向操作者的表单界面和 JSON 接口
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
