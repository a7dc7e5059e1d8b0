// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

use crate::engines::traits::{FetchError, FetchedPage, PageFetcher};
use crate::utils::text_encoding::decode_html;

/// 抓取引擎
///
/// 基于reqwest实现的普通 GET 抓取，不附加额外请求头，也不做认证
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 请求超时；为 `None` 时使用传输层默认行为
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;
        let decoded = decode_html(&bytes);
        if decoded.had_errors {
            warn!(
                "{} is not valid {}; undecodable bytes were replaced with U+FFFD",
                url, decoded.encoding
            );
        }

        debug!(
            "Fetched {} ({} bytes, {}) in {}ms",
            url,
            bytes.len(),
            decoded.encoding,
            start.elapsed().as_millis()
        );

        Ok(FetchedPage {
            url: url.clone(),
            html: decoded.text,
            encoding: decoded.encoding,
        })
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;
        debug!("Downloaded {} ({} bytes)", url, bytes.len());
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
