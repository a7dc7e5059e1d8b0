// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pdf_hunter::config::settings::Settings;
use pdf_hunter::engines::reqwest_engine::ReqwestFetcher;
use pdf_hunter::infrastructure::storage::SettingsUploaderFactory;
use pdf_hunter::presentation::routes;
use pdf_hunter::presentation::state::AppState;
use pdf_hunter::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动表单服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting pdf-hunter...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!(
        "Configuration loaded (storage backend: {})",
        settings.storage.storage_type
    );

    // 3. Initialize components
    let fetcher = Arc::new(ReqwestFetcher::new(settings.fetch.timeout())?);
    // Credentials are loaded per run
    let uploaders = Arc::new(SettingsUploaderFactory::new(settings.clone()));
    let state = AppState::new(settings.clone(), fetcher, uploaders);

    // 4. Start HTTP server
    let app = routes::routes(state);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
