// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ring::signature::RsaKeyPair;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::settings::DriveSettings;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// 凭证错误类型
#[derive(Error, Debug)]
pub enum CredentialError {
    /// 所有来源都没有找到凭证
    #[error("service account credential not found (checked ${env} and {path})")]
    NotFound { env: String, path: String },
    /// 凭证无法读取或格式错误
    #[error("malformed service account credential: {0}")]
    Malformed(String),
}

/// 服务账号密钥
///
/// 与云服务商下发的服务账号 JSON 结构一致
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[REDACTED]")
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// 解析私钥为 RSA 密钥对
    pub fn key_pair(&self) -> Result<RsaKeyPair, CredentialError> {
        let der = pem_to_der(&self.private_key)?;
        RsaKeyPair::from_pkcs8(&der)
            .map_err(|e| CredentialError::Malformed(format!("unusable private key: {}", e)))
    }
}

/// 从 JSON 文本解析并校验服务账号密钥
pub fn parse_service_account(json: &str) -> Result<ServiceAccountKey, CredentialError> {
    let key: ServiceAccountKey =
        serde_json::from_str(json).map_err(|e| CredentialError::Malformed(e.to_string()))?;

    if key.client_email.trim().is_empty() {
        return Err(CredentialError::Malformed("client_email is empty".into()));
    }
    if key.token_uri.trim().is_empty() {
        return Err(CredentialError::Malformed("token_uri is empty".into()));
    }
    if let Some(kind) = key.key_type.as_deref() {
        if kind != "service_account" {
            return Err(CredentialError::Malformed(format!(
                "unexpected credential type: {}",
                kind
            )));
        }
    }
    key.key_pair()?;

    Ok(key)
}

/// 加载服务账号密钥
///
/// 先读取密钥环境变量（部署环境的密钥存储），不存在时回退到本地 JSON 文件。
pub fn load_service_account(settings: &DriveSettings) -> Result<ServiceAccountKey, CredentialError> {
    if let Ok(json) = std::env::var(&settings.credentials_env) {
        if !json.trim().is_empty() {
            debug!("Loading service account from ${}", settings.credentials_env);
            return parse_service_account(&json);
        }
    }

    let path = Path::new(&settings.credentials_path);
    if path.exists() {
        info!("Loading service account from {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| CredentialError::Malformed(format!("{}: {}", path.display(), e)))?;
        return parse_service_account(&json);
    }

    Err(CredentialError::NotFound {
        env: settings.credentials_env.clone(),
        path: settings.credentials_path.clone(),
    })
}

/// 将 PEM 编码的私钥转为 DER 字节
fn pem_to_der(pem: &str) -> Result<Vec<u8>, CredentialError> {
    // Secret stores sometimes keep the newlines escaped
    let pem = pem.replace("\\n", "\n");
    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("-----"))
        .collect();
    if body.is_empty() {
        return Err(CredentialError::Malformed("private_key is empty".into()));
    }
    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| CredentialError::Malformed(format!("private_key is not valid PEM: {}", e)))
}
