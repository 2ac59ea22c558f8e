//! Handler error type with IntoResponse
//!
//! Visitors only ever see a short plaintext message; the underlying error is
//! logged.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::repos::DbError;
use crate::render::RenderError;
use crate::upload::UploadError;

/// Generic body for server-side failures
const INTERNAL_ERROR_BODY: &str = "An internal error occurred.";

#[derive(Debug)]
pub enum AppError {
    /// Database error (500, logged)
    Database(DbError),

    /// View could not be rendered (500, logged)
    Render(RenderError),

    /// Upload could not be stored
    Upload(UploadError),

    /// Malformed request (400)
    BadRequest { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
            Self::Render(e) => {
                tracing::error!(error = %e, "render error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
            Self::Upload(UploadError::InvalidFilename(name)) => {
                tracing::warn!(filename = %name, "rejected upload filename");
                (StatusCode::BAD_REQUEST, "Invalid filename.").into_response()
            }
            Self::Upload(UploadError::Io(e)) => {
                tracing::error!(error = %e, "failed to store upload");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            }
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message).into_response(),
        }
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        Self::Upload(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self::BadRequest {
            message: e.body_text(),
        }
    }
}
