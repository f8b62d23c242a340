//! Story endpoints.

use crate::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::response::Json;
use storybarn_core::{DraftConfig, Story};

/// POST /api/stories/generate
///
/// Accepts a full draft configuration, re-validates it, and produces a
/// persisted story through the generation proxy.
pub async fn generate(
    State(state): State<AppState>,
    Json(config): Json<DraftConfig>,
) -> Result<Json<Story>, ApiError> {
    let story = state.weaver.generate_story(&config).await?;
    Ok(Json(story))
}

/// GET /api/stories/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Story>, ApiError> {
    match state.stories.get(id).await? {
        Some(story) => Ok(Json(story)),
        None => Err(ApiError::not_found("story", id)),
    }
}
