//! Session API Handlers
//!
//! HTTP handlers for login, logout and report-mode toggling.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::session_dto::*},
    error::AppError,
};

/// Log in and create a session
///
/// POST /api/v1/sessions
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt: {}", request.mobile);

    // 档案必须已存在；否则 NotFound
    state.profile_service.get(&request.mobile).await?;

    let session = state.sessions.login(&request.mobile);
    state.metrics.set_active_sessions(state.sessions.active_count());

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// Get session info
///
/// GET /api/v1/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(&id)?;
    Ok(Json(SessionResponse::from(session)))
}

/// Toggle medical report mode
///
/// PUT /api/v1/sessions/:id/report-mode
pub async fn set_report_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReportModeRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Report mode -> {} for session {}", request.enabled, id);

    let session = state.sessions.set_report_mode(&id, request.enabled)?;
    Ok(Json(SessionResponse::from(session)))
}

/// Log out and delete the session
///
/// DELETE /api/v1/sessions/:id
pub async fn logout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.sessions.logout(&id) {
        return Err(AppError::NotFound(format!("会话不存在: {}", id)));
    }
    state.metrics.set_active_sessions(state.sessions.active_count());

    Ok(StatusCode::NO_CONTENT)
}
