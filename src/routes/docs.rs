use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::dto::application_dto::{
    ApplicationListResponse, ApplicationPayload, ApplicationResponse, EditDraftResponse,
    StatsResponse, StatusBreakdownResponse,
};
use crate::dto::preference_dto::ThemePayload;
use crate::dto::search_dto::{SearchRequest, SearchResponse};
use crate::models::application::{ApplicationStatus, Interview, Priority};
use crate::models::listing::JobListing;
use crate::models::preference::Theme;
use crate::models::stats::{ApplicationStats, StatsProgress, StatusCount};
use crate::services::search_service::ResultsView;

#[derive(OpenApi)]
#[openapi(
    info(title = "Job Application Tracker API"),
    paths(
        super::health::health,
        super::applications::list_applications,
        super::applications::create_application,
        super::applications::get_application,
        super::applications::update_application,
        super::applications::delete_application,
        super::applications::begin_edit,
        super::applications::cancel_edit,
        super::applications::get_stats,
        super::applications::get_status_breakdown,
        super::applications::get_timeline,
        super::export::export_applications,
        super::search::search_listings,
        super::search::latest_results,
        super::search::track_listing,
        super::preferences::get_theme,
        super::preferences::set_theme,
        super::preferences::toggle_theme,
        super::preferences::reset_theme,
    ),
    components(schemas(
        ApplicationPayload,
        ApplicationResponse,
        ApplicationListResponse,
        EditDraftResponse,
        StatsResponse,
        StatusBreakdownResponse,
        ApplicationStatus,
        Priority,
        Interview,
        ApplicationStats,
        StatsProgress,
        StatusCount,
        SearchRequest,
        SearchResponse,
        JobListing,
        ResultsView,
        Theme,
        ThemePayload,
    ))
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
