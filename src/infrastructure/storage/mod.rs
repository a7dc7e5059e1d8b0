// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod drive;
pub mod local;
pub mod memory;

use std::sync::Arc;
use tracing::info;

use crate::config::settings::Settings;
use crate::domain::repositories::uploader::{ConfigurationError, PdfUploader, UploaderFactory};
use crate::infrastructure::google::credentials::load_service_account;
use crate::infrastructure::google::token::GoogleTokenProvider;
use drive::DriveUploader;
use local::LocalFolderUploader;
use memory::InMemoryUploader;

/// 存储工厂函数
///
/// 根据配置创建上传器。Drive 后端在这里加载服务账号凭证，
/// 凭证缺失或格式错误时返回配置错误，此时尚未发生任何网络请求。
pub fn create_uploader(settings: &Settings) -> Result<Arc<dyn PdfUploader>, ConfigurationError> {
    match settings.storage.storage_type.as_str() {
        "drive" => {
            let key = load_service_account(&settings.drive)
                .map_err(|e| ConfigurationError(e.to_string()))?;
            let http = reqwest::Client::new();
            let tokens = GoogleTokenProvider::new(&key, settings.drive.scope.clone(), http.clone())
                .map_err(|e| ConfigurationError(e.to_string()))?;
            info!("Drive uploader ready for {}", key.client_email);
            Ok(Arc::new(DriveUploader::new(
                http,
                settings.drive.api_base_url.clone(),
                Arc::new(tokens),
            )))
        }
        "local" => {
            let base_path = settings
                .storage
                .local_path
                .clone()
                .unwrap_or_else(|| "./storage".to_string());
            Ok(Arc::new(LocalFolderUploader::new(base_path)))
        }
        "memory" => Ok(Arc::new(InMemoryUploader::new())),
        other => Err(ConfigurationError(format!(
            "Unsupported storage type: {}",
            other
        ))),
    }
}

/// 基于配置的上传器工厂
pub struct SettingsUploaderFactory {
    settings: Arc<Settings>,
}

impl SettingsUploaderFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl UploaderFactory for SettingsUploaderFactory {
    fn create(&self) -> Result<Arc<dyn PdfUploader>, ConfigurationError> {
        create_uploader(&self.settings)
    }
}
