// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use crate::config::settings::Settings;
use crate::domain::repositories::uploader::UploaderFactory;
use crate::engines::traits::PageFetcher;
use crate::presentation::pending_runs::PendingRuns;

/// 处理器共享的应用状态
///
/// 抓取引擎在进程内共享；上传器由工厂按运行创建
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub uploaders: Arc<dyn UploaderFactory>,
    pub pending_runs: PendingRuns,
}

impl AppState {
    pub fn new(
        settings: Arc<Settings>,
        fetcher: Arc<dyn PageFetcher>,
        uploaders: Arc<dyn UploaderFactory>,
    ) -> Self {
        Self {
            settings,
            fetcher,
            uploaders,
            pending_runs: PendingRuns::default(),
        }
    }
}
