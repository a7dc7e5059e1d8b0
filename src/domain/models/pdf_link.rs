// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use std::fmt;
use url::Url;

/// PDF 链接实体
///
/// 源页面中每个指向 PDF 的锚点对应一个实例，创建后不可变，
/// 仅在一次运行期间存在。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfLink {
    /// 解析后的绝对URL
    pub url: Url,
    /// 锚点的可见文本（已去除首尾空白，可能为空）
    pub display_text: String,
}

impl PdfLink {
    pub fn new(url: Url, display_text: impl Into<String>) -> Self {
        Self {
            url,
            display_text: display_text.into(),
        }
    }
}

/// 目标文件名
///
/// 只能通过名称解析器构造，保证非空、以 ".pdf" 结尾且不包含路径分隔符。
/// 只实现序列化，外部数据无法绕过解析器构造实例：
///
/// ```compile_fail
/// use pdf_hunter::domain::models::pdf_link::DestinationName;
///
/// let name: DestinationName = serde_json::from_str("\"../x.pdf\"").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DestinationName(String);

impl DestinationName {
    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DestinationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 目标文件夹标识符
///
/// 云存储提供方分配的不透明字符串，从操作者提供的文件夹URL中提取，
/// 原样传递给上传器。本系统只向其中写入，从不创建或删除文件夹。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
