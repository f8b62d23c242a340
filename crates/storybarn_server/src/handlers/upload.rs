//! Multipart upload endpoint.

use crate::{ApiError, AppState};
use axum::extract::{Multipart, State};
use axum::response::Json;
use serde::Serialize;
use storybarn_core::{Image, NewImage};
use tracing::warn;

/// Response of POST /api/upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// One record per uploaded file, in upload order
    pub images: Vec<Image>,
}

/// POST /api/upload
///
/// Accepts one or more file parts plus an optional `bookId` text part.
/// Field order matters for `bookId`: parts are processed as they arrive,
/// so a `bookId` sent after the files applies only to later files.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut book_id = "default".to_string();
    let mut pending: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "Malformed multipart body");
        ApiError::validation("Malformed multipart body.", Vec::new())
    })? {
        let name = field.name().map(str::to_string);
        if name.as_deref() == Some("bookId") {
            if let Ok(value) = field.text().await {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    book_id = trimmed.to_string();
                }
            }
        } else {
            let extension = field
                .file_name()
                .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
                .filter(|ext| ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
                .unwrap_or_else(|| "png".to_string());

            let data = field.bytes().await.map_err(|e| {
                warn!(error = %e, "Failed reading upload part");
                ApiError::validation("Could not read the uploaded file.", Vec::new())
            })?;

            if !data.is_empty() {
                pending.push((extension, data.to_vec()));
            }
        }
    }

    if pending.is_empty() {
        return Err(ApiError::validation("No file was uploaded.", Vec::new()));
    }

    let mut images = Vec::with_capacity(pending.len());
    for (extension, data) in pending {
        let path = state.store.store(&book_id, &data, &extension).await?;
        let order = state
            .images
            .list()
            .await
            .map(|all| all.iter().filter(|i| i.book_id == book_id).count() as i32 + 1)
            .unwrap_or(1);

        let stored = state
            .images
            .create(NewImage {
                book_id: book_id.clone(),
                path,
                order,
                selected: false,
                midjourney: None,
            })
            .await?;
        images.push(stored);
    }

    Ok(Json(UploadResponse { images }))
}
