mod dto;
pub mod handlers;
pub mod memory;
pub mod metrics;
pub mod ordering;
pub mod repo;
mod repo_types;
mod services;
pub mod validation;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::meal_routes())
}
