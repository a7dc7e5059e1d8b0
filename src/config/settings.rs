// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 默认的源页面地址（表单预填值）
pub const DEFAULT_SOURCE_URL: &str =
    "https://www.nta.go.jp/about/organization/ntc/soshoshiryo/kazei/2023/index.htm";

/// 应用程序配置设置
///
/// 包含服务器、源页面、抓取、存储和 Google Drive 等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 源页面配置
    pub source: SourceSettings,
    /// 抓取配置
    #[serde(default)]
    pub fetch: FetchSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// Google Drive 配置
    pub drive: DriveSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 源页面配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// 表单中预填的源页面URL
    pub default_url: String,
}

/// 抓取配置设置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchSettings {
    /// 请求超时时间（秒），未设置时使用传输层默认值
    pub timeout_secs: Option<u64>,
}

impl FetchSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (drive, local, memory)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
}

/// Google Drive 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DriveSettings {
    /// 保存服务账号 JSON 的环境变量名
    pub credentials_env: String,
    /// 服务账号 JSON 文件路径（环境变量不存在时使用）
    pub credentials_path: String,
    /// Drive API 基础地址
    pub api_base_url: String,
    /// OAuth2 授权范围
    pub scope: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件和环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PDF_HUNTER").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅使用内置默认值构建配置（测试和嵌入场景使用）
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError>
    {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Source page
            .set_default("source.default_url", DEFAULT_SOURCE_URL)?
            // Storage
            .set_default("storage.storage_type", "drive")?
            .set_default("storage.local_path", "./storage")?
            // Google Drive
            .set_default("drive.credentials_env", "GCP_SERVICE_ACCOUNT")?
            .set_default("drive.credentials_path", "key.json")?
            .set_default("drive.api_base_url", "https://www.googleapis.com")?
            .set_default("drive.scope", "https://www.googleapis.com/auth/drive")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
