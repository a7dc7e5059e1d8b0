// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::TestServer;
use pdf_hunter::application::dto::run_ticket::RunTicketDto;
use pdf_hunter::application::dto::transfer_request::TransferRequestDto;
use pdf_hunter::config::settings::DEFAULT_SOURCE_URL;
use pdf_hunter::infrastructure::storage::memory::InMemoryUploader;
use pdf_hunter::presentation::routes::routes;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{
    source_url, start_source_site, test_state, MissingCredentialFactory, SharedMemoryFactory,
    FOLDER_URL,
};

fn server_with(uploader: InMemoryUploader) -> TestServer {
    let state = test_state(Arc::new(SharedMemoryFactory(uploader)));
    TestServer::new(routes(state)).unwrap()
}

#[tokio::test]
async fn test_health_and_version() {
    let server = server_with(InMemoryUploader::new());

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");

    let response = server.get("/v1/version").await;
    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_form_page_prefills_default_source() {
    let server = server_with(InMemoryUploader::new());

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(&format!("value=\"{}\"", DEFAULT_SOURCE_URL)));
    assert!(html.contains("name=\"folder_url\""));
}

#[tokio::test]
async fn test_form_submission_renders_report() {
    let site = start_source_site().await;
    let uploader = InMemoryUploader::new();
    let server = server_with(uploader.clone());

    let response = server
        .post("/run")
        .form(&TransferRequestDto {
            source_url: source_url(&site),
            folder_url: FOLDER_URL.to_string(),
        })
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Done: 2 uploaded"));
    assert!(html.contains("Ruling 2023.pdf"));
    assert!(html.contains("Guide.PDF"));
    assert_eq!(uploader.files().await.len(), 2);
}

#[tokio::test]
async fn test_form_submission_with_bad_folder_shows_error() {
    let server = server_with(InMemoryUploader::new());

    let response = server
        .post("/run")
        .form(&TransferRequestDto {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            folder_url: "https://drive.google.com/drive/u/0/my-drive".to_string(),
        })
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("invalid folder URL"));
}

#[tokio::test]
async fn test_json_transfer_returns_report() {
    let site = start_source_site().await;
    let server = server_with(InMemoryUploader::new());

    let response = server
        .post("/v1/transfers")
        .json(&json!({
            "source_url": source_url(&site),
            "folder_url": FOLDER_URL,
        }))
        .await;

    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["state"]["state"], "done");
    assert_eq!(report["items"].as_array().unwrap().len(), 2);
    assert_eq!(report["items"][0]["name"], "Ruling 2023.pdf");
    assert_eq!(report["items"][0]["outcome"]["status"], "uploaded");
}

#[tokio::test]
async fn test_json_transfer_status_codes() {
    let server = server_with(InMemoryUploader::new());

    let response = server
        .post("/v1/transfers")
        .json(&json!({
            "source_url": DEFAULT_SOURCE_URL,
            "folder_url": "not a folder",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let report: Value = response.json();
    assert_eq!(report["state"]["detail"]["kind"], "invalid_folder_url");

    let response = server
        .post("/v1/transfers")
        .json(&json!({
            "source_url": "http://127.0.0.1:1/index.htm",
            "folder_url": FOLDER_URL,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);

    let response = server
        .post("/v1/transfers")
        .json(&json!({ "source_url": DEFAULT_SOURCE_URL }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("folder_url"));
}

#[tokio::test]
async fn test_missing_credentials_is_a_configuration_error() {
    let state = test_state(Arc::new(MissingCredentialFactory));
    let server = TestServer::new(routes(state)).unwrap();

    let response = server
        .post("/v1/transfers")
        .json(&json!({
            "source_url": DEFAULT_SOURCE_URL,
            "folder_url": FOLDER_URL,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let report: Value = response.json();
    assert_eq!(report["state"]["detail"]["kind"], "configuration");
}

#[tokio::test]
async fn test_event_stream_reports_progress() {
    let site = start_source_site().await;
    let server = server_with(InMemoryUploader::new());

    let ticket = server
        .post("/runs")
        .form(&TransferRequestDto {
            source_url: source_url(&site),
            folder_url: FOLDER_URL.to_string(),
        })
        .await;
    assert_eq!(ticket.status_code(), StatusCode::CREATED);
    let ticket: RunTicketDto = ticket.json();

    let response = server.get("/run/events").add_query_params(&ticket).await;

    response.assert_status_ok();
    let body = response.text();
    let events: Vec<Value> = body
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|data| serde_json::from_str(data).unwrap())
        .collect();

    let kinds: Vec<&str> = events
        .iter()
        .map(|e| e["event"].as_str().unwrap())
        .collect();
    assert_eq!(kinds.first(), Some(&"state_changed"));
    assert_eq!(kinds.last(), Some(&"finished"));
    assert_eq!(kinds.iter().filter(|k| **k == "item_finished").count(), 2);

    let last_item = events
        .iter()
        .rev()
        .find(|e| e["event"] == "item_finished")
        .unwrap();
    assert_eq!(last_item["fraction"], 1.0);
}

#[tokio::test]
async fn test_registering_a_run_makes_no_requests() {
    let site = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;
    let uploader = InMemoryUploader::new();
    let server = server_with(uploader.clone());

    let response = server
        .post("/runs")
        .form(&TransferRequestDto {
            source_url: format!("{}/index.htm", site.uri()),
            folder_url: FOLDER_URL.to_string(),
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert!(uploader.files().await.is_empty());
}

#[tokio::test]
async fn test_event_stream_ticket_is_single_use() {
    let site = start_source_site().await;
    let uploader = InMemoryUploader::new();
    let server = server_with(uploader.clone());

    let ticket: RunTicketDto = server
        .post("/runs")
        .form(&TransferRequestDto {
            source_url: source_url(&site),
            folder_url: FOLDER_URL.to_string(),
        })
        .await
        .json();

    server
        .get("/run/events")
        .add_query_params(&ticket)
        .await
        .assert_status_ok();

    let replay = server.get("/run/events").add_query_params(&ticket).await;
    assert_eq!(replay.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(uploader.files().await.len(), 2);
}

#[tokio::test]
async fn test_event_stream_never_runs_without_a_ticket() {
    let site = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;
    let server = server_with(InMemoryUploader::new());

    let unknown = server
        .get("/run/events")
        .add_query_param("run_id", Uuid::new_v4())
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);

    let direct = server
        .get("/run/events")
        .add_query_params(&TransferRequestDto {
            source_url: format!("{}/index.htm", site.uri()),
            folder_url: FOLDER_URL.to_string(),
        })
        .await;
    assert_eq!(direct.status_code(), StatusCode::BAD_REQUEST);
}
