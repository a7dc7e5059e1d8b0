// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::models::pdf_link::{DestinationName, FolderId};
use crate::domain::repositories::uploader::{PdfUploader, UploadError, UploadReceipt};

/// 重名时最多尝试的编号
const MAX_DUPLICATE_SUFFIX: usize = 10_000;

/// 本地文件系统存储实现
///
/// 文件写入 `{base_path}/{folder_id}/{name}`。与云端一样从不覆盖已有文件，
/// 同名时在 ".pdf" 之前追加 " (n)"。
pub struct LocalFolderUploader {
    base_path: PathBuf,
}

impl LocalFolderUploader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

fn numbered_name(name: &str, n: usize) -> String {
    if n == 0 {
        return name.to_string();
    }
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => {
            format!("{} ({}){}", &name[..split], n, ext)
        }
        _ => format!("{} ({})", name, n),
    }
}

#[async_trait]
impl PdfUploader for LocalFolderUploader {
    async fn upload(
        &self,
        folder: &FolderId,
        name: &DestinationName,
        content: Vec<u8>,
    ) -> Result<UploadReceipt, UploadError> {
        let dir = self.base_path.join(folder.as_str());
        fs::create_dir_all(&dir).await?;

        for n in 0..MAX_DUPLICATE_SUFFIX {
            let candidate = dir.join(numbered_name(name.as_str(), n));
            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(UploadError::Io(e)),
            };
            file.write_all(&content).await?;
            file.flush().await?;

            return Ok(UploadReceipt {
                file_id: Some(candidate.to_string_lossy().into_owned()),
            });
        }

        Err(UploadError::Other(format!(
            "too many files named {} in {}",
            name,
            dir.display()
        )))
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
