// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::dto::transfer_request::TransferRequestDto;

/// 未认领登记的有效期
pub const PENDING_RUN_TTL: Duration = Duration::from_secs(300);

/// 等待事件流认领的运行
///
/// `POST /runs` 登记请求并返回随机令牌，`GET /run/events` 凭令牌认领后才开始运行。
/// 每个令牌只能认领一次，过期的登记在下次登记时清理。
#[derive(Clone)]
pub struct PendingRuns {
    runs: Arc<Mutex<HashMap<Uuid, (Instant, TransferRequestDto)>>>,
    ttl: Duration,
}

impl Default for PendingRuns {
    fn default() -> Self {
        Self::with_ttl(PENDING_RUN_TTL)
    }
}

impl PendingRuns {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            runs: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn register(&self, request: TransferRequestDto) -> Uuid {
        let mut runs = self.runs.lock().await;
        runs.retain(|_, (created, _)| created.elapsed() < self.ttl);

        let run_id = Uuid::new_v4();
        runs.insert(run_id, (Instant::now(), request));
        run_id
    }

    /// 取出并移除登记；未知、已认领或已过期的令牌返回 `None`
    pub async fn claim(&self, run_id: &Uuid) -> Option<TransferRequestDto> {
        let mut runs = self.runs.lock().await;
        match runs.remove(run_id) {
            Some((created, request)) if created.elapsed() < self.ttl => Some(request),
            _ => None,
        }
    }
}
