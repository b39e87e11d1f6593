//! Read-only views over accounts and the help inbox, gated on the admin
//! role claim.

use axum::{extract::State, routing::get, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::{extractors::AdminUser, repo_types::User},
    error::ApiError,
    help::repo::HelpMessage,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/messages", get(list_messages))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list_all(&state.db).await?;
    info!(%admin_id, count = users.len(), "admin listed users");
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
) -> Result<Json<Vec<HelpMessage>>, ApiError> {
    let messages = HelpMessage::list_all(&state.db).await?;
    info!(%admin_id, count = messages.len(), "admin listed help messages");
    Ok(Json(messages))
}
