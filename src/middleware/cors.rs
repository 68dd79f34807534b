use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin may call the API; only the methods and headers the routes use
/// are allowed.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any)
}
