// ABOUTME: File upload route handlers and static serving of stored uploads
// ABOUTME: Multipart POST /api/upload, DELETE /api/upload/:filename, GET /uploads/* via ServeDir
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::authenticate_admin;
use crate::{
    constants::{error_messages, limits, paths},
    errors::AppError,
    resources::ServerResources,
};
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

/// Upload routes handler
pub struct UploadRoutes;

impl UploadRoutes {
    /// Create the upload API routes and the public `/uploads` file service
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let body_limit = usize::try_from(
            resources
                .uploads
                .max_size_bytes()
                .saturating_add(limits::MULTIPART_OVERHEAD_BYTES),
        )
        .unwrap_or(usize::MAX);
        let files = ServeDir::new(resources.uploads.root());

        Router::new()
            .route("/api/upload", post(Self::handle_upload))
            .route("/api/upload/:filename", delete(Self::handle_delete))
            .layer(DefaultBodyLimit::max(body_limit))
            .nest_service(paths::UPLOADS_PREFIX, files)
            .with_state(resources)
    }

    /// Handle POST /api/upload
    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        let max_size = resources.uploads.max_size_bytes();
        while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            let file_name = field
                .file_name()
                .map(ToOwned::to_owned)
                .ok_or_else(|| AppError::invalid_input("Upload is missing a file name"))?;

            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                bytes.extend_from_slice(&chunk);
                if u64::try_from(bytes.len()).unwrap_or(u64::MAX) > max_size {
                    return Err(AppError::payload_too_large(error_messages::FILE_TOO_LARGE));
                }
            }

            let stored = resources.uploads.save(&file_name, &bytes).await?;
            return Ok((StatusCode::OK, Json(stored)).into_response());
        }

        Err(AppError::invalid_input("Multipart field 'file' is required"))
    }

    /// Handle DELETE /api/upload/:filename
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(filename): Path<String>,
    ) -> Result<Response, AppError> {
        authenticate_admin(&headers, &resources).await?;

        resources.uploads.delete(&filename).await?;
        Ok((
            StatusCode::OK,
            Json(json!({ "message": "File deleted successfully" })),
        )
            .into_response())
    }
}

fn multipart_error(error: MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large(error_messages::FILE_TOO_LARGE)
    } else {
        AppError::invalid_input(format!("Invalid multipart body: {}", error.body_text()))
    }
}
