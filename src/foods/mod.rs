pub mod catalog;
mod dto;
pub mod handlers;
pub mod nutrients;
mod services;
pub mod usda;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::food_routes())
}
