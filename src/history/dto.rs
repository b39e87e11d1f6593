use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::HistoryRecord;

#[derive(Debug, Deserialize)]
pub struct CreateHistoryRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClearHistoryRequest {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub payload: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<HistoryRecord> for HistoryEntry {
    fn from(r: HistoryRecord) -> Self {
        Self {
            id: r.id,
            payload: r.payload,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub search: Vec<HistoryEntry>,
    pub calculator: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct CreatedHistoryResponse {
    pub success: bool,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
