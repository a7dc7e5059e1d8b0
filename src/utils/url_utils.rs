// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 判断路径是否以 ".pdf" 结尾（不区分大小写）
pub fn has_pdf_extension(path: &str) -> bool {
    path.len() >= 4
        && path
            .get(path.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".pdf"))
}

/// 取URL路径的最后一段并做百分号解码
///
/// 解码出的斜杠和反斜杠替换为 '_'，非法 UTF-8 序列替换为 U+FFFD
pub fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode_binary(segment.as_bytes());
    Some(String::from_utf8_lossy(&decoded).replace(|c: char| c == '/' || c == '\\', "_"))
}
