//! Wire types for the InsightX backend

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::session::SessionId;

/// `POST /api/ask` body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub session_id: SessionId,
}

/// `POST /api/ask` response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// `POST /api/clear` body
#[derive(Debug, Clone, Serialize)]
pub struct ClearRequest {
    pub session_id: SessionId,
}

/// `GET /` response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Category name to count
pub type CategoryCounts = BTreeMap<String, u64>;

/// `GET /api/summary` response
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub total_transactions: u64,
    /// Percentage, 0-100
    pub success_rate: f64,
    pub total_amount_crores: f64,
    #[serde(default)]
    pub transaction_types: CategoryCounts,
}

/// `GET /api/data/failures` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FailureBreakdown {
    #[serde(default)]
    pub by_merchant_category: CategoryCounts,
    #[serde(default)]
    pub by_network: CategoryCounts,
    #[serde(default)]
    pub by_device: CategoryCounts,
    #[serde(default)]
    pub by_bank: CategoryCounts,
}

/// `GET /api/data/trends` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Trends {
    #[serde(default)]
    pub by_hour: Vec<HourlyRate>,
}

/// Success rate for one hour of the day
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct HourlyRate {
    /// 0-23
    pub hour_of_day: u8,
    pub success_rate: f64,
}

impl HourlyRate {
    pub fn new(hour_of_day: u8, success_rate: f64) -> Self {
        Self {
            hour_of_day,
            success_rate,
        }
    }
}
