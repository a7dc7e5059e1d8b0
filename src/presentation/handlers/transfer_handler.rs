// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, QueryRejection},
        Extension, Form, Json, Query,
    },
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, IntoResponse,
    },
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    application::{
        dto::{run_ticket::RunTicketDto, transfer_request::TransferRequestDto},
        progress::{ChannelReporter, FanOutReporter, ProgressReporter, TracingReporter},
        use_cases::batch_runner::BatchRunner,
    },
    domain::models::{
        progress::ProgressEvent,
        run_state::AbortReason,
        transfer::RunReport,
    },
    presentation::{errors::AppError, state::AppState, views},
};

async fn execute(
    state: &AppState,
    request: &TransferRequestDto,
    reporter: &dyn ProgressReporter,
) -> RunReport {
    info!("Starting run: {} -> {}", request.source_url, request.folder_url);
    BatchRunner::run_once(
        state.fetcher.clone(),
        state.uploaders.as_ref(),
        request,
        reporter,
    )
    .await
}

/// 表单页面
pub async fn index(Extension(state): Extension<AppState>) -> Html<String> {
    Html(views::form_page(&state.settings.source.default_url))
}

/// 表单提交：执行一次运行并渲染结果页面
pub async fn run_form(
    Extension(state): Extension<AppState>,
    payload: Result<Form<TransferRequestDto>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(request) = payload?;
    let report = execute(&state, &request, &TracingReporter).await;
    Ok(Html(views::report_page(&request, &report)))
}

/// 登记一次运行，返回事件流使用的一次性令牌
///
/// 只登记，不发起任何网络请求
pub async fn start_run(
    Extension(state): Extension<AppState>,
    payload: Result<Form<TransferRequestDto>, FormRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Form(request) = payload?;
    let run_id = state.pending_runs.register(request).await;
    debug!("Registered run {}", run_id);
    Ok((StatusCode::CREATED, Json(RunTicketDto { run_id })))
}

/// 认领已登记的运行，并以 Server-Sent Events 推送其进度
///
/// 令牌只能认领一次，重复或伪造的请求不会触发上传。
/// 运行在后台任务中进行，客户端断开不会中断运行。
pub async fn run_events(
    Extension(state): Extension<AppState>,
    payload: Result<Query<RunTicketDto>, QueryRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let Query(ticket) = payload?;
    let request = state
        .pending_runs
        .claim(&ticket.run_id)
        .await
        .ok_or_else(|| AppError::not_found("unknown, expired or already started run"))?;
    let (sender, receiver) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let channel = ChannelReporter::new(sender);
        let reporters: Vec<&dyn ProgressReporter> = vec![&TracingReporter, &channel];
        execute(&state, &request, &FanOutReporter::new(reporters)).await;
    });

    let events = stream::unfold(receiver, |mut receiver| async move {
        let event = receiver.recv().await?;
        Some((Ok::<_, Infallible>(to_sse_event(&event)), receiver))
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn to_sse_event(event: &ProgressEvent) -> Event {
    Event::default().json_data(event).unwrap_or_else(|e| {
        warn!("Failed to serialize progress event: {}", e);
        Event::default().event("error").data(e.to_string())
    })
}

/// JSON 接口：执行一次运行并返回完整报告
pub async fn create_transfer(
    Extension(state): Extension<AppState>,
    payload: Result<Json<TransferRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    let report = execute(&state, &request, &TracingReporter).await;

    let status = match report.abort_reason() {
        None => StatusCode::OK,
        Some(reason) if reason.is_soft() => StatusCode::OK,
        Some(AbortReason::InvalidFolderUrl) => StatusCode::BAD_REQUEST,
        Some(AbortReason::Fetch(_)) => StatusCode::BAD_GATEWAY,
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    Ok((status, Json(report)))
}
