// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::domain::models::pdf_link::PdfLink;
use crate::utils::url_utils::{has_pdf_extension, resolve_url};

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector is valid"));

/// PDF 链接提取器
///
/// 负责从HTML内容中找出所有指向 PDF 的锚点
pub struct LinkExtractor;

impl LinkExtractor {
    /// 从HTML内容中提取 PDF 链接
    ///
    /// 解析器对任意输入都能容错，无法解析的片段直接跳过，因此本函数不会失败。
    /// 结果保持锚点在文档中的原始顺序，不做去重。
    ///
    /// # 参数
    ///
    /// * `html_content` - HTML内容
    /// * `base_url` - 用于解析相对链接的基础URL
    ///
    /// # 返回值
    ///
    /// 按文档顺序排列的 PDF 链接列表
    pub fn extract(html_content: &str, base_url: &Url) -> Vec<PdfLink> {
        let document = Html::parse_document(html_content);
        let mut links = Vec::new();

        for element in document.select(&ANCHOR_SELECTOR) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            if !has_pdf_extension(href) {
                continue;
            }

            let url = match resolve_url(base_url, href) {
                Ok(url) => url,
                Err(e) => {
                    debug!("Skipping unresolvable href {:?}: {}", href, e);
                    continue;
                }
            };

            // Only keep http/https links whose resolved path is still a .pdf
            if url.scheme() != "http" && url.scheme() != "https" {
                continue;
            }
            if !has_pdf_extension(url.path()) {
                continue;
            }

            let display_text = element.text().collect::<String>().trim().to_string();
            links.push(PdfLink::new(url, display_text));
        }

        debug!("Extracted {} PDF links from {}", links.len(), base_url);
        links
    }
}
