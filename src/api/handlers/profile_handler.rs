//! Profile API Handlers
//!
//! HTTP handlers for registration, profile lookup and medical notes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::profile_dto::*},
    error::AppError,
    services::profile::RegisterProfile,
};

/// Register a new user
///
/// POST /api/v1/users
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering user: {}", request.mobile);

    let profile = state
        .profile_service
        .register(RegisterProfile {
            mobile: request.mobile,
            name: request.name,
            age: request.age,
            gender: request.gender,
            country: request.country,
            height_cm: request.height_cm,
            weight_kg: request.weight_kg,
        })
        .await?;

    state.metrics.record_registration();
    let response = ProfileResponse::from(profile);

    Ok((StatusCode::CREATED, Json(response)))
}

/// List registered profiles
///
/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (profiles, total) = state.profile_service.list(query.limit, query.offset).await?;

    let response = ListUsersResponse {
        users: profiles.into_iter().map(ProfileResponse::from).collect(),
        total,
    };

    Ok(Json(response))
}

/// Get a profile by mobile number
///
/// GET /api/v1/users/:mobile
pub async fn get_user(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Getting profile: {}", mobile);

    let profile = state.profile_service.get(&mobile).await?;
    let response = ProfileResponse::from(profile);

    Ok(Json(response))
}

/// Append a medical note to a profile
///
/// POST /api/v1/users/:mobile/notes
pub async fn append_note(
    State(state): State<AppState>,
    Path(mobile): Path<String>,
    Json(request): Json<AppendNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Appending note for: {}", mobile);

    let profile = state
        .profile_service
        .append_note(&mobile, &request.text)
        .await?;

    state.metrics.record_note();
    let response = ProfileResponse::from(profile);

    Ok((StatusCode::CREATED, Json(response)))
}
