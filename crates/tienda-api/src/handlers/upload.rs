//! Image upload handler.
//!
//! Accepts a multipart batch and reports a per-file outcome: valid files are
//! stored and their URLs returned, invalid ones are listed with the reason.
//! A bad file never fails the whole request.

use std::sync::Arc;

use axum::{extract::Multipart, extract::State, response::IntoResponse, Json};
use serde::Serialize;
use tienda_core::ErrorMetadata;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::editor::{AssetUploader, StorageUploader};
use crate::state::AppState;
use crate::utils::upload::{
    extract_multipart_files, sanitize_filename, validate_content_type, validate_file_extension,
    validate_file_size, UploadFile,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Public URLs of the stored files, in request order.
    pub images: Vec<String>,
    /// Files that were not stored, with the reason.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<UploadFailure>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadFailure {
    pub filename: String,
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/api/admin/upload",
    tag = "upload",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Per-file upload outcomes", body = UploadResponse),
        (status = 400, description = "No file provided or unreadable form", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn upload_images(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let files = extract_multipart_files(multipart).await?;
    let uploader = StorageUploader::new(state.assets.storage.clone());

    let mut images = Vec::new();
    let mut failures = Vec::new();

    for file in files {
        match store_one(&state, &uploader, &file).await {
            Ok(url) => images.push(url),
            Err(e) => {
                tracing::warn!(filename = %file.filename, error = %e, "Rejected upload");
                failures.push(UploadFailure {
                    filename: file.filename,
                    error: e.client_message(),
                });
            }
        }
    }

    tracing::info!(
        stored = images.len(),
        rejected = failures.len(),
        "Upload batch processed"
    );

    Ok(Json(UploadResponse { images, failures }))
}

async fn store_one(
    state: &AppState,
    uploader: &StorageUploader,
    file: &UploadFile,
) -> Result<String, tienda_core::AppError> {
    let assets = &state.assets;
    validate_file_size(file.data.len(), assets.max_file_size_bytes)?;
    validate_content_type(&file.content_type, &assets.allowed_content_types)?;
    let extension = validate_file_extension(&file.filename, &assets.allowed_extensions)?;
    sanitize_filename(&file.filename)?;

    // Stored under a fresh name so concurrent uploads of "photo.jpg" never collide.
    let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
    uploader
        .upload(&stored_name, &file.content_type, file.data.clone())
        .await
}
