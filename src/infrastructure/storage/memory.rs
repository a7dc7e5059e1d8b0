// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::models::pdf_link::{DestinationName, FolderId};
use crate::domain::repositories::uploader::{PdfUploader, UploadError, UploadReceipt};

/// 内存中保存的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub folder: FolderId,
    pub name: String,
    pub content: Vec<u8>,
}

/// 内存存储实现（用于演练和测试）
///
/// 按上传顺序记录所有文件，同名文件会重复保存。
#[derive(Clone, Default)]
pub struct InMemoryUploader {
    files: Arc<RwLock<Vec<StoredFile>>>,
}

impl InMemoryUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn files(&self) -> Vec<StoredFile> {
        self.files.read().await.clone()
    }
}

#[async_trait]
impl PdfUploader for InMemoryUploader {
    async fn upload(
        &self,
        folder: &FolderId,
        name: &DestinationName,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, UploadError> {
        let mut files = self.files.write().await;
        files.push(StoredFile {
            folder: folder.clone(),
            name: name.to_string(),
            content,
        });
        Ok(UploadReceipt {
            file_id: Some(format!("mem-{}", files.len())),
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
