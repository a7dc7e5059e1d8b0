// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Google 服务账号集成
///
/// - 凭证加载（credentials）：从密钥环境变量或本地 JSON 文件读取服务账号
/// - 访问令牌（token）：JWT-bearer 授权流程换取 OAuth2 访问令牌
pub mod credentials;
pub mod token;
