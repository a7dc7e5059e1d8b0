// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pdf_hunter::application::dto::transfer_request::TransferRequestDto;
use pdf_hunter::application::progress::CollectingReporter;
use pdf_hunter::application::use_cases::batch_runner::BatchRunner;
use pdf_hunter::domain::models::progress::ProgressEvent;
use pdf_hunter::domain::models::run_state::{AbortReason, RunState};
use pdf_hunter::domain::models::transfer::{TransferFailure, TransferOutcome};
use pdf_hunter::engines::reqwest_engine::ReqwestFetcher;
use pdf_hunter::infrastructure::storage::memory::InMemoryUploader;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    source_url, start_source_site, RejectingUploader, FOLDER_ID, FOLDER_URL,
};

fn fetcher() -> Arc<ReqwestFetcher> {
    Arc::new(ReqwestFetcher::new(None).unwrap())
}

#[tokio::test]
async fn test_end_to_end_both_uploads_succeed() {
    let site = start_source_site().await;
    let uploader = InMemoryUploader::new();
    let runner = BatchRunner::new(fetcher(), Arc::new(uploader.clone()));
    let reporter = CollectingReporter::new();

    let report = runner
        .run(
            &TransferRequestDto {
                source_url: source_url(&site),
                folder_url: FOLDER_URL.to_string(),
            },
            &reporter,
        )
        .await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.summary(), "2 uploaded");
    assert_eq!(
        report.items[0].link.url.as_str(),
        format!("{}/kazei/files/ruling-2023.pdf", site.uri())
    );

    let files = uploader.files().await;
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "Ruling 2023.pdf");
    assert_eq!(files[0].content, b"%PDF-1.4 ruling");
    assert_eq!(files[1].name, "Guide.PDF");
    assert_eq!(files[1].content, b"%PDF-1.4 guide");
    assert!(files.iter().all(|f| f.folder.as_str() == FOLDER_ID));

    let finished = reporter
        .events()
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ItemFinished { .. }))
        .count();
    assert_eq!(finished, 2);
}

#[tokio::test]
async fn test_end_to_end_one_upload_fails() {
    let site = start_source_site().await;
    let uploader = RejectingUploader {
        inner: InMemoryUploader::new(),
        reject: "Guide.PDF",
    };
    let runner = BatchRunner::new(fetcher(), Arc::new(uploader));

    let report = runner
        .run(
            &TransferRequestDto {
                source_url: source_url(&site),
                folder_url: FOLDER_URL.to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.uploaded_count(), 1);
    assert_eq!(report.failed_count(), 1);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.name.as_str(), "Guide.PDF");
    assert!(matches!(
        &failure.outcome,
        TransferOutcome::Failed { reason: TransferFailure::Upload(msg) } if msg.contains("quota")
    ));
}

#[tokio::test]
async fn test_missing_pdf_is_a_download_failure() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.htm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"<a href="gone.pdf">Gone</a>"#, "text/html"),
        )
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.pdf"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let uploader = InMemoryUploader::new();
    let runner = BatchRunner::new(fetcher(), Arc::new(uploader.clone()));
    let report = runner
        .run(
            &TransferRequestDto {
                source_url: format!("{}/index.htm", site.uri()),
                folder_url: FOLDER_URL.to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.summary(), "0 uploaded, 1 failed");
    assert!(matches!(
        &report.items[0].outcome,
        TransferOutcome::Failed { reason: TransferFailure::Download(msg) } if msg.contains("404")
    ));
    assert!(uploader.files().await.is_empty());
}

#[tokio::test]
async fn test_zero_pdf_page_is_a_soft_stop() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<a href="a.html">A</a><a href="b.htm">B</a>"#,
            "text/html",
        ))
        .mount(&site)
        .await;

    let uploader = InMemoryUploader::new();
    let runner = BatchRunner::new(fetcher(), Arc::new(uploader.clone()));
    let report = runner
        .run(
            &TransferRequestDto {
                source_url: format!("{}/index.htm", site.uri()),
                folder_url: FOLDER_URL.to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    assert_eq!(report.abort_reason(), Some(&AbortReason::NoPdfsFound));
    assert!(uploader.files().await.is_empty());
}

#[tokio::test]
async fn test_source_error_status_aborts() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&site)
        .await;

    let runner = BatchRunner::new(fetcher(), Arc::new(InMemoryUploader::new()));
    let report = runner
        .run(
            &TransferRequestDto {
                source_url: format!("{}/index.htm", site.uri()),
                folder_url: FOLDER_URL.to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    match report.abort_reason() {
        Some(AbortReason::Fetch(msg)) => assert!(msg.contains("503")),
        other => panic!("unexpected abort reason {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_folder_url_makes_no_request() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;

    let runner = BatchRunner::new(fetcher(), Arc::new(InMemoryUploader::new()));
    let report = runner
        .run(
            &TransferRequestDto {
                source_url: format!("{}/index.htm", site.uri()),
                folder_url: "https://drive.google.com/drive/my-drive".to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    assert_eq!(report.abort_reason(), Some(&AbortReason::InvalidFolderUrl));
}

#[tokio::test]
async fn test_shift_jis_page_keeps_link_text() {
    let site = MockServer::start().await;
    let html = "<html><body><p>国税庁の課税部門における訴訟資料を掲載しています。\
        各資料の内容については、それぞれの判決文をご覧ください。</p>\
        <a href=\"hanketsu.pdf\">令和5年 判決文</a></body></html>";
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(html);
    Mock::given(method("GET"))
        .and(path("/index.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.into_owned(), "text/html"))
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/hanketsu.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF".to_vec(), "application/pdf"))
        .mount(&site)
        .await;

    let uploader = InMemoryUploader::new();
    let runner = BatchRunner::new(fetcher(), Arc::new(uploader.clone()));
    let report = runner
        .run(
            &TransferRequestDto {
                source_url: format!("{}/index.htm", site.uri()),
                folder_url: FOLDER_URL.to_string(),
            },
            &CollectingReporter::new(),
        )
        .await;

    assert_eq!(report.state, RunState::Done);
    assert_eq!(uploader.files().await[0].name, "令和5年 判決文.pdf");
}
