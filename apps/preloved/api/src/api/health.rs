//! Readiness endpoint
//!
//! Liveness (`/health`) comes from `axum_helpers::server::health_router`;
//! readiness additionally pings PostgreSQL.

use axum::{extract::State, routing::get, Router};
use axum_helpers::server::run_health_checks;
use database::postgres::check_health;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let checks: Vec<(&str, axum_helpers::server::HealthCheckFuture<'_>)> = vec![(
        "postgres",
        Box::pin(async {
            check_health(&state.db).await.map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}

pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
