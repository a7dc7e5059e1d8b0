// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::models::pdf_link::{DestinationName, FolderId};

/// PDF 的 MIME 类型
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// 上传错误类型
#[derive(Error, Debug)]
pub enum UploadError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 认证失败
    #[error("authentication failed: {0}")]
    Auth(String),
    /// 网络传输错误
    #[error("transport error: {0}")]
    Transport(String),
    /// 存储服务返回错误
    #[error("storage API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// 其他存储错误
    #[error("storage error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        UploadError::Transport(err.to_string())
    }
}

/// 上传成功后的回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    /// 存储端分配的文件ID（如果存储端提供）
    pub file_id: Option<String>,
}

/// 上传器特质
///
/// 在目标文件夹中以给定名称新建一个条目。不检查、也不覆盖同名条目，
/// 因此多次运行可能产生重复文件。实现不得重试。
#[async_trait]
pub trait PdfUploader: Send + Sync {
    async fn upload(
        &self,
        folder: &FolderId,
        name: &DestinationName,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, UploadError>;

    /// 后端名称
    fn backend(&self) -> &'static str;
}

/// 配置错误（凭证缺失或格式错误等）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConfigurationError(pub String);

/// 上传器工厂
///
/// 每次运行创建一个上传器（客户端句柄），运行内的所有上传复用它。
pub trait UploaderFactory: Send + Sync {
    fn create(&self) -> Result<Arc<dyn PdfUploader>, ConfigurationError>;
}
