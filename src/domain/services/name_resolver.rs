// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

use crate::domain::models::pdf_link::{DestinationName, PdfLink};
use crate::utils::url_utils::last_path_segment;

/// 文件名主干的最大字符数
pub const MAX_STEM_CHARS: usize = 100;

const PDF_SUFFIX: &str = ".pdf";
const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// 目标文件名解析器
pub struct NameResolver;

impl NameResolver {
    /// 根据链接文本和URL生成安全的目标文件名
    ///
    /// 文本非空时：替换非法字符、去除首尾空白、截断到100个字符后追加 ".pdf"。
    /// 即使文本本身已以 ".pdf" 结尾也会再追加一次。
    /// 文本为空时：原样使用URL路径的最后一段。
    pub fn resolve(display_text: &str, url: &Url) -> DestinationName {
        let text = display_text.trim();
        if !text.is_empty() {
            let stem = sanitize(text);
            return DestinationName::new_unchecked(format!("{}{}", stem, PDF_SUFFIX));
        }

        match last_path_segment(url) {
            Some(segment) => DestinationName::new_unchecked(segment),
            None => DestinationName::new_unchecked(format!("document{}", PDF_SUFFIX)),
        }
    }

    pub fn resolve_link(link: &PdfLink) -> DestinationName {
        Self::resolve(&link.display_text, &link.url)
    }
}

/// 替换非法字符、去除首尾空白并截断
pub fn sanitize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().chars().take(MAX_STEM_CHARS).collect()
}
