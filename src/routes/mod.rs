pub mod applications;
pub mod docs;
pub mod export;
pub mod health;
pub mod preferences;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::cors::permissive_cors;
use crate::middleware::rate_limit::{rps_middleware, RateLimiter};
use crate::AppState;

pub fn build_router(state: AppState, rps: u32) -> Router {
    let api = Router::new()
        .route(
            "/api/applications",
            get(applications::list_applications).post(applications::create_application),
        )
        .route("/api/applications/stats", get(applications::get_stats))
        .route(
            "/api/applications/status-breakdown",
            get(applications::get_status_breakdown),
        )
        .route("/api/applications/timeline", get(applications::get_timeline))
        .route("/api/applications/export", get(export::export_applications))
        .route(
            "/api/applications/:id",
            get(applications::get_application)
                .put(applications::update_application)
                .delete(applications::delete_application),
        )
        .route("/api/applications/:id/edit", post(applications::begin_edit))
        .route(
            "/api/applications/:id/edit/cancel",
            post(applications::cancel_edit),
        )
        .route("/api/search", post(search::search_listings))
        .route("/api/search/latest", get(search::latest_results))
        .route("/api/search/track", post(search::track_listing))
        .route(
            "/api/preferences/theme",
            get(preferences::get_theme)
                .put(preferences::set_theme)
                .delete(preferences::reset_theme),
        )
        .route(
            "/api/preferences/theme/toggle",
            post(preferences::toggle_theme),
        )
        .route("/api/openapi.json", get(docs::openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            RateLimiter::new(rps),
            rps_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
        .layer(permissive_cors())
        .layer(TraceLayer::new_for_http())
}
