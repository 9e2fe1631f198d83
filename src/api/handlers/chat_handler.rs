//! Chat API Handlers
//!
//! HTTP handler for one chat turn within a login session.

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::chat_dto::*},
    error::AppError,
};

/// Process one chat turn
///
/// POST /api/v1/sessions/:id/chat
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(&id)?;
    debug!("Chat turn for {} (session {})", session.mobile, id);

    let turn = state
        .chat_service
        .chat(&session, &request.message, request.record)
        .await?;

    Ok(Json(ChatResponse::from(turn)))
}
