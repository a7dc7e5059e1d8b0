// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::models::pdf_link::FolderId;

static FOLDER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"folders/([A-Za-z0-9_-]+)").expect("static pattern is valid"));

/// 从文件夹URL中提取文件夹ID
///
/// 匹配第一个 `folders/<id>` 片段，`<id>` 由字母、数字、连字符和下划线组成。
pub fn extract_folder_id(folder_url: &str) -> Option<FolderId> {
    FOLDER_ID_PATTERN
        .captures(folder_url)
        .and_then(|caps| caps.get(1))
        .map(|m| FolderId::new(m.as_str()))
}
