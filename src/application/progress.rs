// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::domain::models::progress::ProgressEvent;
use crate::domain::models::run_state::RunState;
use crate::domain::models::transfer::TransferOutcome;

/// 进度报告特质
///
/// 运行器在每次状态变化和每个链接处理前后调用
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// 写入日志的进度报告器
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn report(&self, event: &ProgressEvent) {
        match event {
            // The final state is logged again by `Finished`
            ProgressEvent::StateChanged { state } if state.is_terminal() => {
                debug!("Run state: {}", state)
            }
            ProgressEvent::StateChanged { state } => info!("Run state: {}", state),
            ProgressEvent::ItemStarted { index, total, name } => {
                info!("[{}/{}] Saving: {}", index + 1, total, name)
            }
            ProgressEvent::ItemFinished {
                index,
                total,
                name,
                outcome,
                fraction,
            } => match outcome {
                TransferOutcome::Uploaded { .. } => info!(
                    "[{}/{}] Uploaded {} ({:.0}%)",
                    index + 1,
                    total,
                    name,
                    fraction * 100.0
                ),
                TransferOutcome::Failed { reason } => warn!(
                    "[{}/{}] Failed {}: {} ({:.0}%)",
                    index + 1,
                    total,
                    name,
                    reason,
                    fraction * 100.0
                ),
            },
            ProgressEvent::Finished { report } => match &report.state {
                RunState::Aborted(reason) if reason.is_soft() => warn!("Run stopped: {}", reason),
                RunState::Aborted(reason) => error!("Run aborted: {}", reason),
                _ => info!("Run finished: {}", report.summary()),
            },
        }
    }
}

/// 把事件转发到通道的进度报告器（用于 SSE 推送）
pub struct ChannelReporter {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, event: &ProgressEvent) {
        // The receiver may have gone away with the client; the run continues regardless
        if self.sender.send(event.clone()).is_err() {
            debug!("Progress listener disconnected; run continues");
        }
    }
}

/// 收集所有事件的进度报告器
#[derive(Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<ProgressEvent>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl ProgressReporter for CollectingReporter {
    fn report(&self, event: &ProgressEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// 同时转发给多个报告器
pub struct FanOutReporter<'a> {
    reporters: Vec<&'a dyn ProgressReporter>,
}

impl<'a> FanOutReporter<'a> {
    pub fn new(reporters: Vec<&'a dyn ProgressReporter>) -> Self {
        Self { reporters }
    }
}

impl ProgressReporter for FanOutReporter<'_> {
    fn report(&self, event: &ProgressEvent) {
        for reporter in &self.reporters {
            reporter.report(event);
        }
    }
}
