// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 请求失败
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 服务器返回错误状态码
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    /// 其他错误
    #[error("{0}")]
    Other(String),
}

/// 已获取的源页面
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// 请求的URL
    pub url: Url,
    /// 解码后的HTML
    pub html: String,
    /// 解码所用的字符编码
    pub encoding: &'static str,
}

/// 页面抓取特质
///
/// 对批处理运行器而言，每次调用都是阻塞式的：没有取消，也没有重试。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取源页面并按检测到的编码解码
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// 获取二进制内容（PDF）
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
