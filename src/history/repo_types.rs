use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Which page a history entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    Search,
    Calculator,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Search => "search",
            HistoryKind::Calculator => "calculator",
        }
    }
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(HistoryKind::Search),
            "calculator" => Ok(HistoryKind::Calculator),
            other => anyhow::bail!("unknown history kind {other:?}"),
        }
    }
}

/// Row of the `history` table.
#[derive(Debug, Clone, FromRow)]
pub struct HistoryRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub payload: sqlx::types::Json<serde_json::Value>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: HistoryKind,
    pub payload: serde_json::Value,
    pub created_at: OffsetDateTime,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = anyhow::Error;

    fn try_from(r: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            kind: r.kind.parse()?,
            payload: r.payload.0,
            created_at: r.created_at,
        })
    }
}
