// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pdf_hunter::application::dto::transfer_request::TransferRequestDto;
use pdf_hunter::application::progress::CollectingReporter;
use pdf_hunter::application::use_cases::batch_runner::BatchRunner;
use pdf_hunter::config::settings::Settings;
use pdf_hunter::domain::models::run_state::RunState;
use pdf_hunter::engines::reqwest_engine::ReqwestFetcher;
use pdf_hunter::infrastructure::storage::SettingsUploaderFactory;
use std::sync::Arc;
use tempfile::TempDir;

use super::helpers::{source_url, start_source_site, FOLDER_ID, FOLDER_URL};

#[tokio::test]
async fn test_repeated_runs_keep_both_copies_on_disk() {
    let site = start_source_site().await;
    let dir = TempDir::new().unwrap();

    let mut settings = Settings::defaults().unwrap();
    settings.storage.storage_type = "local".to_string();
    settings.storage.local_path = Some(dir.path().to_string_lossy().into_owned());
    let factory = SettingsUploaderFactory::new(Arc::new(settings));
    let fetcher = Arc::new(ReqwestFetcher::new(None).unwrap());

    let request = TransferRequestDto {
        source_url: source_url(&site),
        folder_url: FOLDER_URL.to_string(),
    };

    for _ in 0..2 {
        let report =
            BatchRunner::run_once(fetcher.clone(), &factory, &request, &CollectingReporter::new())
                .await;
        assert_eq!(report.state, RunState::Done);
        assert_eq!(report.summary(), "2 uploaded");
    }

    let folder = dir.path().join(FOLDER_ID);
    let mut names: Vec<String> = std::fs::read_dir(&folder)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    assert_eq!(
        names,
        vec![
            "Guide (1).PDF",
            "Guide.PDF",
            "Ruling 2023 (1).pdf",
            "Ruling 2023.pdf",
        ]
    );
    assert_eq!(
        std::fs::read(folder.join("Ruling 2023.pdf")).unwrap(),
        b"%PDF-1.4 ruling"
    );
}
