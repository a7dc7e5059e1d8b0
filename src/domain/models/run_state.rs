// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 批处理运行状态
///
/// `Idle → FetchingPage → ExtractingLinks → TransferringLinks(i) → Done`，
/// 任意状态都可以进入终止状态 `Aborted`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum RunState {
    Idle,
    FetchingPage,
    ExtractingLinks,
    /// 正在处理第 i 个链接（从0开始）
    TransferringLinks(usize),
    Done,
    Aborted(AbortReason),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted(_))
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::FetchingPage => write!(f, "fetching page"),
            RunState::ExtractingLinks => write!(f, "extracting links"),
            RunState::TransferringLinks(i) => write!(f, "transferring link #{}", i + 1),
            RunState::Done => write!(f, "done"),
            RunState::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// 运行中止原因
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum AbortReason {
    /// 凭证缺失或格式错误
    #[error("configuration error: {0}")]
    Configuration(String),
    /// 文件夹URL中没有可识别的文件夹ID
    #[error("invalid folder URL")]
    InvalidFolderUrl,
    /// 源页面无法获取
    #[error("fetch error: {0}")]
    Fetch(String),
    /// 页面中没有 PDF 链接（软停止）
    #[error("no PDFs found")]
    NoPdfsFound,
}

impl AbortReason {
    /// 软停止只作为警告呈现，不视为错误
    pub fn is_soft(&self) -> bool {
        matches!(self, AbortReason::NoPdfsFound)
    }
}
