//! File upload passthrough to the managed blob bucket.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
    pub url: String,
}

/// POST /api/files/upload - multipart form with a `file` field. The object
/// is stored under its client-supplied filename and the bucket's public
/// URL is returned.
pub async fn upload(
    State(st): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let path = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::BadRequest("file field missing a filename".to_string()))?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed reading upload: {e}")))?;

        let url = st
            .stores
            .blobs
            .upload(&path, bytes.to_vec(), &content_type)
            .await?;

        info!(%path, size = bytes.len(), "stored upload");
        return Ok(Json(UploadResponse { path, url }));
    }

    Err(ApiError::BadRequest("missing 'file' field".to_string()))
}
