use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{
    ClearHistoryRequest, CreateHistoryRequest, CreatedHistoryResponse, HistoryListResponse,
    SuccessResponse,
};
use super::repo_types::HistoryKind;
use crate::{auth::extractors::AuthUser, error::ApiError, state::AppState};

const LIST_LIMIT: i64 = 50;

pub fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(list_history).post(create_history))
        .route("/history/clear", post(clear_history))
        .route("/history/:id", delete(delete_history))
}

#[instrument(skip(state))]
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let search = state
        .history
        .list_recent(user_id, HistoryKind::Search, LIST_LIMIT)
        .await?;
    let calculator = state
        .history
        .list_recent(user_id, HistoryKind::Calculator, LIST_LIMIT)
        .await?;
    Ok(Json(HistoryListResponse {
        search: search.into_iter().map(Into::into).collect(),
        calculator: calculator.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip(state, body))]
pub async fn create_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Option<Json<CreateHistoryRequest>>,
) -> Result<Json<CreatedHistoryResponse>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::InvalidInput("No data provided".into()));
    };

    let kind: HistoryKind = body
        .kind
        .as_deref()
        .and_then(|k| k.parse::<HistoryKind>().ok())
        .ok_or_else(|| ApiError::InvalidInput("Invalid history type".into()))?;

    let payload = body
        .payload
        .filter(|p| !is_blank(p))
        .ok_or_else(|| ApiError::InvalidInput("No payload provided".into()))?;

    let record = state.history.insert(user_id, kind, &payload).await?;
    info!(user_id = %record.user_id, id = %record.id, %kind, "history saved");
    Ok(Json(CreatedHistoryResponse {
        success: true,
        id: record.id,
    }))
}

/// Ids that are not UUIDs cannot exist, so they read as not found.
#[instrument(skip(state))]
pub async fn delete_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let not_found = || ApiError::NotFound("Record not found".into());
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;

    if !state.history.delete_owned(user_id, id).await? {
        warn!(%user_id, %id, "history delete missed");
        return Err(not_found());
    }
    Ok(Json(SuccessResponse::ok()))
}

#[instrument(skip(state, body))]
pub async fn clear_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Option<Json<ClearHistoryRequest>>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let kind = match body.kind.as_deref() {
        None | Some("") => None,
        Some(k) => match k.parse::<HistoryKind>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                // No record can carry an unknown type, so there is nothing to delete.
                info!(%user_id, kind = k, "history clear matched no type");
                return Ok(Json(SuccessResponse::ok()));
            }
        },
    };

    let removed = state.history.clear(user_id, kind).await?;
    info!(%user_id, kind = ?kind, removed, "history cleared");
    Ok(Json(SuccessResponse::ok()))
}

/// Falsy JSON counts as no payload: null, false, zero, and empty strings or
/// containers.
fn is_blank(payload: &serde_json::Value) -> bool {
    match payload {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
    }
}
