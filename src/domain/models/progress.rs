// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use super::pdf_link::DestinationName;
use super::run_state::RunState;
use super::transfer::{RunReport, TransferOutcome};

/// 进度事件
///
/// 运行器在状态变化和每个链接处理前后发出，供表单界面和日志使用。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// 状态迁移
    StateChanged { state: RunState },
    /// 开始处理第 index 个链接
    ItemStarted {
        index: usize,
        total: usize,
        name: DestinationName,
    },
    /// 第 index 个链接处理完毕
    ItemFinished {
        index: usize,
        total: usize,
        name: DestinationName,
        outcome: TransferOutcome,
        fraction: f64,
    },
    /// 运行结束（Done 或 Aborted）
    Finished { report: RunReport },
}

/// 计算进度比例 `(index + 1) / total`，最后一项恰好为 1.0
pub fn progress_fraction(index: usize, total: usize) -> f64 {
    if total == 0 || index + 1 >= total {
        return 1.0;
    }
    (index + 1) as f64 / total as f64
}
