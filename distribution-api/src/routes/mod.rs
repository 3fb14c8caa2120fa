//! API route definitions

mod distributions;
mod health;

use crate::AppState;
use axum::Router;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(distributions::routes())
        .merge(health::routes())
}
