//! Admin image upload

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Router};

use crate::auth::AuthContext;
use crate::http::{AppError, AppState};
use crate::upload::save_upload;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file1";

/// POST /uploader - store `file1` in the upload directory
async fn upload(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let mut multipart = multipart.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;
        save_upload(&state.config.uploads.dir, &filename, &bytes).await?;
        return Ok("Uploaded successfully!".into_response());
    }

    Err(AppError::BadRequest {
        message: "No file uploaded.".to_string(),
    })
}

/// GET /uploader - nothing to show, back to the dashboard
async fn uploader_page() -> Redirect {
    Redirect::to("/dashboard")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/uploader", get(uploader_page).post(upload))
        .layer(DefaultBodyLimit::disable())
}
