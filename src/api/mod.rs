//! The HTTP API.

use axum::Router;

use crate::infra::state::AppState;

pub mod name_validation;

/// Constructs the full API without middleware.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(name_validation::name_validation_api::routes())
        .with_state(state)
}
