use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::{
    dto::application_dto::ApplicationListQuery, error::Result,
    services::export_service::ExportService, AppState,
};

/// Export the current view (same filters as the list) as XLSX
#[utoipa::path(
    get,
    path = "/api/applications/export",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title, company or location"),
        ("status" = Option<String>, Query, description = "Status filter, or `all`"),
        ("sort" = Option<String>, Query, description = "Row order")
    ),
    responses(
        (status = 200, description = "XLSX workbook", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    )
)]
#[axum::debug_handler]
pub async fn export_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let (applications, _) = state.application_service.list(query)?;

    let buffer = ExportService::generate_applications_xlsx(&applications)?;
    let filename = format!(
        "applications_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
