//! Image endpoints.

use crate::{ApiError, AppState};
use axum::extract::{Path, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use storybarn_core::{Image, ImageAnalysis, JobStatus};
use storybarn_generation::IllustrationSpec;
use storybarn_models::ImaginePrompt;

/// Body of POST /api/images/generate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageBody {
    /// What the illustration shows
    #[serde(default)]
    pub description: String,
    /// Character details to keep consistent
    #[serde(default)]
    pub characteristics: Option<String>,
    /// Scene setting
    #[serde(default)]
    pub setting: Option<String>,
    /// Illustration style
    #[serde(default)]
    pub art_style: Option<String>,
    /// Book the image belongs to
    #[serde(default)]
    pub book_id: Option<String>,
}

/// Response of POST /api/images/generate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    /// Id of the pending image record
    pub image_id: i32,
    /// Job status, always pending at creation
    pub status: JobStatus,
}

/// POST /api/images/generate
///
/// Records a MidJourney-style job; the image stays pending until a status
/// update arrives.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateImageBody>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let prompt = ImaginePrompt {
        description: body.description,
        characteristics: body.characteristics,
        setting: body.setting,
        art_style: body.art_style,
    };

    let image = state
        .weaver
        .generate_midjourney(&prompt, body.book_id.as_deref())
        .await?;

    Ok(Json(GenerateImageResponse {
        image_id: image.id,
        status: JobStatus::Pending,
    }))
}

/// Body of POST /api/images/generate-dalle.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDalleBody {
    /// The illustration prompt
    #[serde(default)]
    pub prompt: String,
    /// Illustration style
    #[serde(default)]
    pub art_style: Option<String>,
    /// Coat colors to keep consistent
    #[serde(default)]
    pub colors: Vec<String>,
    /// Book the image belongs to
    #[serde(default)]
    pub book_id: Option<String>,
}

/// Response of POST /api/images/generate-dalle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDalleResponse {
    /// Id of the stored image record
    pub id: i32,
    /// Relative path under the upload root
    pub path: String,
}

/// POST /api/images/generate-dalle
pub async fn generate_dalle(
    State(state): State<AppState>,
    Json(body): Json<GenerateDalleBody>,
) -> Result<Json<GenerateDalleResponse>, ApiError> {
    let spec = IllustrationSpec {
        prompt: body.prompt,
        art_style: body.art_style,
        colors: body.colors,
        book_id: body.book_id,
    };

    let image = state.weaver.generate_image_from_prompt(&spec).await?;
    Ok(Json(GenerateDalleResponse {
        id: image.id,
        path: image.path,
    }))
}

/// Response of POST /api/images/:id/analyze: the character-profile fields
/// merged with the image path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Image id
    pub id: i32,
    /// Relative path under the upload root
    pub path: String,
    /// Scene description
    pub description: String,
    /// Profile of the pictured character
    pub character_profile: storybarn_core::CharacterProfile,
}

/// POST /api/images/:id/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let image = state.weaver.analyze_image(id).await?;

    // analyzed=true implies analysis is present; guard anyway so a broken
    // invariant surfaces as a 500 instead of a panic.
    let ImageAnalysis {
        description,
        character_profile,
    } = image.analysis.ok_or_else(|| {
        ApiError::not_found("analysis for image", id)
    })?;

    Ok(Json(AnalyzeResponse {
        id: image.id,
        path: image.path,
        description,
        character_profile,
    }))
}

/// GET /api/images
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Image>>, ApiError> {
    Ok(Json(state.images.list().await?))
}
