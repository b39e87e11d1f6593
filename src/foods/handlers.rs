use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::dto::{CompositeResult, FoodQuery, FoodsResponse};
use super::services::resolve_composite;
use crate::{error::ApiError, state::AppState};

const SEARCH_PAGE_SIZE: u32 = 10;

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/foods/search", get(search_foods))
        .route("/foods/composite", get(composite_food))
}

/// GET /foods/search?q=... proxies the external search, up to ten results.
#[instrument(skip(state))]
pub async fn search_foods(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> Result<Json<FoodsResponse>, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::InvalidInput("Query parameter required".into()));
    }
    if !state.foods.is_configured() {
        return Err(ApiError::Configuration("USDA API key not configured".into()));
    }

    let foods = state
        .foods
        .search(query, SEARCH_PAGE_SIZE)
        .await
        .map_err(|e| {
            error!(error = %format!("{e:#}"), query, "food search failed");
            ApiError::Upstream(e.to_string())
        })?;
    Ok(Json(FoodsResponse { foods }))
}

#[instrument(skip(state))]
pub async fn composite_food(
    State(state): State<AppState>,
    Query(params): Query<FoodQuery>,
) -> Result<Json<CompositeResult>, ApiError> {
    let result = resolve_composite(&state.catalog, state.foods.as_ref(), &params.q).await?;
    Ok(Json(result))
}
