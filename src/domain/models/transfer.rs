// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::pdf_link::{DestinationName, PdfLink};
use super::run_state::{AbortReason, RunState};

/// 单个链接的传输失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "message", rename_all = "snake_case")]
pub enum TransferFailure {
    /// 下载 PDF 失败
    #[error("download failed: {0}")]
    Download(String),
    /// 上传到目标文件夹失败
    #[error("upload failed: {0}")]
    Upload(String),
}

/// 单个链接的传输结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// 已上传，附带存储端返回的文件ID（如有）
    Uploaded { file_id: Option<String> },
    /// 失败
    Failed { reason: TransferFailure },
}

impl TransferOutcome {
    pub fn is_uploaded(&self) -> bool {
        matches!(self, TransferOutcome::Uploaded { .. })
    }
}

impl fmt::Display for TransferOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransferOutcome::Uploaded { .. } => write!(f, "uploaded"),
            TransferOutcome::Failed { reason } => write!(f, "failed ({})", reason),
        }
    }
}

/// 单个链接的处理记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub link: PdfLink,
    pub name: DestinationName,
    pub outcome: TransferOutcome,
}

/// 一次运行的最终报告
///
/// 每个发现的链接恰好对应一条记录，顺序与源页面中的文档顺序一致。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// 终止状态：`Done` 或 `Aborted`
    pub state: RunState,
    pub items: Vec<ItemReport>,
}

impl RunReport {
    pub fn done(items: Vec<ItemReport>) -> Self {
        Self {
            state: RunState::Done,
            items,
        }
    }

    pub fn aborted(reason: AbortReason) -> Self {
        Self {
            state: RunState::Aborted(reason),
            items: Vec::new(),
        }
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match &self.state {
            RunState::Aborted(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn uploaded_count(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_uploaded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.items.len() - self.uploaded_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|i| !i.outcome.is_uploaded())
    }

    /// 面向操作者的汇总行
    pub fn summary(&self) -> String {
        if let Some(reason) = self.abort_reason() {
            return reason.to_string();
        }
        match self.failed_count() {
            0 => format!("{} uploaded", self.uploaded_count()),
            failed => format!("{} uploaded, {} failed", self.uploaded_count(), failed),
        }
    }
}
