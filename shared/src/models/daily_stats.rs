//! Daily Stats Model

use serde::{Deserialize, Serialize};

/// 每日营业额 (`daily_stats` 表，day 为 `YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub day: String,
    #[serde(default)]
    pub total: i64,
}
