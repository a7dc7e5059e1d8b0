// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::models::pdf_link::{DestinationName, FolderId};
use crate::domain::repositories::uploader::{
    PdfUploader, UploadError, UploadReceipt, PDF_MIME_TYPE,
};
use crate::infrastructure::google::token::TokenSource;

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: Option<String>,
}

/// Google Drive 上传实现
///
/// 使用 Drive v3 的 multipart 上传：一次请求同时提交元数据和文件内容
pub struct DriveUploader {
    http: reqwest::Client,
    api_base_url: String,
    tokens: Arc<dyn TokenSource>,
}

impl DriveUploader {
    pub fn new(
        http: reqwest::Client,
        api_base_url: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into(),
            tokens,
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/upload/drive/v3/files",
            self.api_base_url.trim_end_matches('/')
        )
    }
}

/// 构造 `multipart/related` 请求体：JSON 元数据在前，文件内容在后
pub fn multipart_related_body(
    boundary: &str,
    metadata: &serde_json::Value,
    mime_type: &str,
    content: &[u8],
) -> Vec<u8> {
    let metadata = metadata.to_string();
    let mut body = Vec::with_capacity(content.len() + metadata.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[async_trait]
impl PdfUploader for DriveUploader {
    async fn upload(
        &self,
        folder: &FolderId,
        name: &DestinationName,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, UploadError> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| UploadError::Auth(e.to_string()))?;

        let metadata = json!({
            "name": name.as_str(),
            "parents": [folder.as_str()],
        });
        let boundary = format!("pdf_hunter_{}", Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &metadata, PDF_MIME_TYPE, &content);

        let response = self
            .http
            .post(self.upload_url())
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .bearer_auth(token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedFile = response.json().await?;
        debug!("Created Drive file {:?} named {}", created.id, name);

        Ok(UploadReceipt {
            file_id: created.id,
        })
    }

    fn backend(&self) -> &'static str {
        "drive"
    }
}
