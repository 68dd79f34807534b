use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::{
    dto::application_dto::{
        ApplicationListQuery, ApplicationListResponse, ApplicationPayload, ApplicationResponse,
        EditDraftResponse, StatsResponse, StatusBreakdownResponse, TimelineQuery,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/applications",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title, company or location"),
        ("status" = Option<String>, Query, description = "Status filter, or `all`"),
        ("sort" = Option<String>, Query, description = "date-desc, date-asc, title, company or salary")
    ),
    responses(
        (status = 200, description = "Filtered and sorted applications", body = ApplicationListResponse),
        (status = 400, description = "Unknown status or sort key")
    )
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let (items, stored) = state.application_service.list(query)?;
    Ok(Json(ApplicationListResponse {
        total: items.len(),
        stored,
        items: items.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationPayload,
    responses(
        (status = 201, description = "Application added", body = ApplicationResponse),
        (status = 400, description = "Title or company missing")
    )
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.create(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from(application)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(&id)?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    put,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    request_body = ApplicationPayload,
    responses(
        (status = 200, description = "Application saved", body = ApplicationResponse),
        (status = 400, description = "Title or company missing"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ApplicationPayload>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.update(&id, payload)?;
    Ok(Json(ApplicationResponse::from(application)))
}

#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Application removed, or was already gone")
    )
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.application_service.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/edit",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 200, description = "Record taken out for editing", body = EditDraftResponse),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let draft = state.application_service.begin_edit(&id)?;
    Ok(Json(EditDraftResponse { id, draft }))
}

#[utoipa::path(
    post,
    path = "/api/applications/{id}/edit/cancel",
    params(
        ("id" = String, Path, description = "Application ID")
    ),
    responses(
        (status = 204, description = "Pending edit abandoned and record restored")
    )
)]
#[axum::debug_handler]
pub async fn cancel_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.application_service.cancel_edit(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/applications/stats",
    responses(
        (status = 200, description = "Headline counts and progress widths", body = StatsResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.application_service.stats()?;
    Ok(Json(StatsResponse::from(stats)))
}

#[utoipa::path(
    get,
    path = "/api/applications/status-breakdown",
    responses(
        (status = 200, description = "Count per status in pipeline order", body = StatusBreakdownResponse)
    )
)]
#[axum::debug_handler]
pub async fn get_status_breakdown(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.application_service.status_breakdown()?;
    Ok(Json(StatusBreakdownResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/applications/timeline",
    params(
        ("limit" = Option<usize>, Query, description = "Number of records, default 5")
    ),
    responses(
        (status = 200, description = "Most recently dated applications", body = Vec<ApplicationResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<impl IntoResponse> {
    let items = state.application_service.timeline(query.limit)?;
    let items: Vec<ApplicationResponse> = items.into_iter().map(Into::into).collect();
    Ok(Json(items))
}
