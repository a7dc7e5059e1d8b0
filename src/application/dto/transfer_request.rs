// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 传输请求
///
/// 操作者在表单中提交的两个输入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequestDto {
    /// 源页面URL
    pub source_url: String,
    /// 目标文件夹URL（需包含 `folders/<id>`）
    pub folder_url: String,
}
