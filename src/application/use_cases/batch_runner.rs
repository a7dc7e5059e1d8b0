// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::application::dto::transfer_request::TransferRequestDto;
use crate::application::progress::ProgressReporter;
use crate::domain::models::pdf_link::{FolderId, PdfLink};
use crate::domain::models::progress::{progress_fraction, ProgressEvent};
use crate::domain::models::run_state::{AbortReason, RunState};
use crate::domain::models::transfer::{ItemReport, RunReport, TransferFailure, TransferOutcome};
use crate::domain::repositories::uploader::{PdfUploader, UploaderFactory};
use crate::domain::services::folder_id::extract_folder_id;
use crate::domain::services::link_extractor::LinkExtractor;
use crate::domain::services::name_resolver::NameResolver;
use crate::engines::traits::{FetchedPage, PageFetcher};

/// 批处理运行器
///
/// 编排一次完整的运行：校验文件夹URL、获取源页面、提取链接，
/// 然后按文档顺序逐个下载并上传。单个链接失败只记录为该链接的失败结果，
/// 不会中止整批；致命错误以 `Aborted` 报告返回，不会向外传播。
pub struct BatchRunner {
    fetcher: Arc<dyn PageFetcher>,
    uploader: Arc<dyn PdfUploader>,
}

impl BatchRunner {
    pub fn new(fetcher: Arc<dyn PageFetcher>, uploader: Arc<dyn PdfUploader>) -> Self {
        Self { fetcher, uploader }
    }

    /// 用工厂为本次运行创建上传器（客户端句柄）后执行
    ///
    /// 工厂失败（凭证缺失或格式错误）时以配置错误中止，不发生任何网络请求
    pub async fn run_once(
        fetcher: Arc<dyn PageFetcher>,
        factory: &dyn UploaderFactory,
        request: &TransferRequestDto,
        reporter: &dyn ProgressReporter,
    ) -> RunReport {
        match factory.create() {
            Ok(uploader) => Self::new(fetcher, uploader).run(request, reporter).await,
            Err(e) => finish(
                reporter,
                RunReport::aborted(AbortReason::Configuration(e.to_string())),
            ),
        }
    }

    /// 执行一次运行
    #[instrument(skip(self, reporter), fields(backend = self.uploader.backend()))]
    pub async fn run(
        &self,
        request: &TransferRequestDto,
        reporter: &dyn ProgressReporter,
    ) -> RunReport {
        let report = match self.execute(request, reporter).await {
            Ok(items) => RunReport::done(items),
            Err(reason) => RunReport::aborted(reason),
        };
        finish(reporter, report)
    }

    async fn execute(
        &self,
        request: &TransferRequestDto,
        reporter: &dyn ProgressReporter,
    ) -> Result<Vec<ItemReport>, AbortReason> {
        // Guard: no network activity before the folder is known
        let folder = extract_folder_id(&request.folder_url).ok_or(AbortReason::InvalidFolderUrl)?;

        transition(reporter, RunState::FetchingPage);
        let page = self.fetch_page(&request.source_url).await?;

        transition(reporter, RunState::ExtractingLinks);
        let links = extract_links(&page)?;
        info!("Found {} PDF links on {}", links.len(), page.url);

        let total = links.len();
        let mut items = Vec::with_capacity(total);
        for (index, link) in links.into_iter().enumerate() {
            transition(reporter, RunState::TransferringLinks(index));
            items.push(self.transfer(&folder, link, index, total, reporter).await);
        }

        Ok(items)
    }

    async fn fetch_page(&self, source_url: &str) -> Result<FetchedPage, AbortReason> {
        let url = Url::parse(source_url.trim())
            .map_err(|e| AbortReason::Fetch(format!("invalid source URL {:?}: {}", source_url, e)))?;

        debug!("Fetching {} with the {} engine", url, self.fetcher.name());
        let page = self
            .fetcher
            .fetch_page(&url)
            .await
            .map_err(|e| AbortReason::Fetch(e.to_string()))?;
        debug!("Decoded source page as {}", page.encoding);
        Ok(page)
    }

    async fn transfer(
        &self,
        folder: &FolderId,
        link: PdfLink,
        index: usize,
        total: usize,
        reporter: &dyn ProgressReporter,
    ) -> ItemReport {
        let name = NameResolver::resolve_link(&link);
        reporter.report(&ProgressEvent::ItemStarted {
            index,
            total,
            name: name.clone(),
        });

        let outcome = match self.fetcher.fetch_bytes(&link.url).await {
            Err(e) => TransferOutcome::Failed {
                reason: TransferFailure::Download(e.to_string()),
            },
            Ok(content) => match self.uploader.upload(folder, &name, content).await {
                Ok(receipt) => TransferOutcome::Uploaded {
                    file_id: receipt.file_id,
                },
                Err(e) => TransferOutcome::Failed {
                    reason: TransferFailure::Upload(e.to_string()),
                },
            },
        };

        if let TransferOutcome::Failed { reason } = &outcome {
            warn!("Transfer of {} ({}) failed: {}", name, link.url, reason);
        }

        reporter.report(&ProgressEvent::ItemFinished {
            index,
            total,
            name: name.clone(),
            outcome: outcome.clone(),
            fraction: progress_fraction(index, total),
        });

        ItemReport {
            link,
            name,
            outcome,
        }
    }
}

fn finish(reporter: &dyn ProgressReporter, report: RunReport) -> RunReport {
    reporter.report(&ProgressEvent::StateChanged {
        state: report.state.clone(),
    });
    reporter.report(&ProgressEvent::Finished {
        report: report.clone(),
    });
    report
}

fn transition(reporter: &dyn ProgressReporter, state: RunState) {
    reporter.report(&ProgressEvent::StateChanged { state });
}

fn extract_links(page: &FetchedPage) -> Result<Vec<PdfLink>, AbortReason> {
    let links = LinkExtractor::extract(&page.html, &page.url);
    if links.is_empty() {
        return Err(AbortReason::NoPdfsFound);
    }
    Ok(links)
}
