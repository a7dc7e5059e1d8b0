// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::transfer_handler;
use crate::presentation::state::AppState;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let operator_routes = Router::new()
        .route("/", get(transfer_handler::index))
        .route("/run", post(transfer_handler::run_form))
        .route("/runs", post(transfer_handler::start_run))
        .route("/run/events", get(transfer_handler::run_events))
        .route("/v1/transfers", post(transfer_handler::create_transfer));

    Router::new()
        .merge(public_routes)
        .merge(operator_routes)
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
