// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施模块
///
/// 提供外部服务集成：Google 服务账号认证与各类存储后端
pub mod google;
pub mod storage;
