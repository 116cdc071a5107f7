//! Router assembly.

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    create_url_handler, delete_url_handler, health_handler, resolve_handler, stats_handler,
    update_url_handler,
};
use crate::api::middleware::rate_policy_gate;
use crate::state::AppState;

/// Builds the application router.
///
/// # Endpoints
///
/// - `GET    /health`                - Liveness probe (not rate limited)
/// - `POST   /shorten`               - Create a short URL
/// - `GET    /shorten/{code}`        - Resolve a code, bumping its access count
/// - `PUT    /shorten/{code}`        - Replace the target URL
/// - `DELETE /shorten/{code}`        - Delete a short URL
/// - `GET    /shorten/{code}/stats`  - Record statistics, count untouched
///
/// The rate policy gate wraps every route; request tracing wraps the gate
/// so rejected requests are still logged.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/shorten", post(create_url_handler))
        .route(
            "/shorten/{code}",
            get(resolve_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/shorten/{code}/stats", get(stats_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_policy_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
