use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::ApplicationPayload,
    dto::search_dto::{SearchRequest, SearchResponse},
    error::Result,
    models::listing::JobListing,
    services::search_service::ResultsView,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Listings matching the query", body = SearchResponse),
        (status = 400, description = "Search term missing"),
        (status = 502, description = "Listing provider failed")
    )
)]
#[axum::debug_handler]
pub async fn search_listings(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> Result<impl IntoResponse> {
    let response = state.search_service.search(payload).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/search/latest",
    responses(
        (status = 200, description = "What the results panel currently shows", body = ResultsView)
    )
)]
#[axum::debug_handler]
pub async fn latest_results(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.search_service.results_view())
}

/// Turns a listing into a pre-filled draft; nothing is stored until the
/// draft is submitted to `POST /api/applications`.
#[utoipa::path(
    post,
    path = "/api/search/track",
    request_body = JobListing,
    responses(
        (status = 200, description = "Draft application for the listing", body = ApplicationPayload)
    )
)]
#[axum::debug_handler]
pub async fn track_listing(Json(listing): Json<JobListing>) -> impl IntoResponse {
    Json(ApplicationPayload::from(listing))
}
