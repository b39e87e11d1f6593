use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use super::repo::HelpMessage;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct HelpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl HelpRequest {
    /// Trimmed fields, or `None` when any of them is blank.
    fn filled(&self) -> Option<(&str, &str, &str)> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return None;
        }
        Some((name, email, message))
    }
}

#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub success: bool,
    pub id: Uuid,
}

pub fn help_routes() -> Router<AppState> {
    Router::new().route("/help", post(submit_help))
}

#[instrument(skip(state, body))]
pub async fn submit_help(
    State(state): State<AppState>,
    body: Option<Json<HelpRequest>>,
) -> Result<Json<HelpResponse>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let (name, email, message) = body
        .filled()
        .ok_or_else(|| ApiError::InvalidInput("Please fill in all fields".into()))?;

    let saved = HelpMessage::create(&state.db, name, email, message).await?;
    info!(id = %saved.id, "help message received");
    Ok(Json(HelpResponse {
        success: true,
        id: saved.id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_are_required() {
        let full = HelpRequest {
            name: " Ann ".into(),
            email: "ann@example.com".into(),
            message: "The calculator lost my entry".into(),
        };
        assert_eq!(
            full.filled(),
            Some(("Ann", "ann@example.com", "The calculator lost my entry"))
        );

        let blank_message = HelpRequest {
            message: "   ".into(),
            ..full
        };
        assert_eq!(blank_message.filled(), None);
        assert_eq!(HelpRequest::default().filled(), None);
    }
}
