use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{dto::preference_dto::ThemePayload, error::Result, AppState};

#[utoipa::path(
    get,
    path = "/api/preferences/theme",
    responses(
        (status = 200, description = "Current theme", body = ThemePayload)
    )
)]
#[axum::debug_handler]
pub async fn get_theme(State(state): State<AppState>) -> impl IntoResponse {
    Json(ThemePayload::from(state.preference_service.theme()))
}

#[utoipa::path(
    put,
    path = "/api/preferences/theme",
    request_body = ThemePayload,
    responses(
        (status = 200, description = "Theme saved", body = ThemePayload),
        (status = 422, description = "Unknown theme")
    )
)]
#[axum::debug_handler]
pub async fn set_theme(
    State(state): State<AppState>,
    Json(payload): Json<ThemePayload>,
) -> Result<impl IntoResponse> {
    let theme = state.preference_service.set_theme(payload.theme)?;
    Ok(Json(ThemePayload::from(theme)))
}

#[utoipa::path(
    post,
    path = "/api/preferences/theme/toggle",
    responses(
        (status = 200, description = "Theme after flipping", body = ThemePayload)
    )
)]
#[axum::debug_handler]
pub async fn toggle_theme(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let theme = state.preference_service.toggle()?;
    Ok(Json(ThemePayload::from(theme)))
}

#[utoipa::path(
    delete,
    path = "/api/preferences/theme",
    responses(
        (status = 200, description = "Saved theme cleared; default in effect", body = ThemePayload)
    )
)]
#[axum::debug_handler]
pub async fn reset_theme(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let theme = state.preference_service.reset()?;
    Ok(Json(ThemePayload::from(theme)))
}
