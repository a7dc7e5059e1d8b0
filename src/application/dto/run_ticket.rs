// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 已登记、等待事件流认领的运行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunTicketDto {
    /// 一次性运行令牌
    pub run_id: Uuid,
}
