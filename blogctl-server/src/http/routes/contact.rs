//! Public contact form

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use chrono::Utc;

use crate::db::ContactRepo;
use crate::http::{AppError, AppState};
use crate::models::NewContact;
use crate::render::View;

const SEND_FAILED: &str = "An error occurred while sending the message.";

/// GET /contact
async fn contact_form(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    state.render(&View::Contact { sent: false })
}

/// POST /contact - store the message and show the form again
async fn contact_submit(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<NewContact>,
) -> Result<Response, AppError> {
    match ContactRepo::new(&state.pool).create(&submission, Utc::now()).await {
        Ok(message) => {
            tracing::info!(id = message.id, "contact message stored");
            state.render(&View::Contact { sent: true })
        }
        Err(e) => {
            tracing::error!(error = %e, "error while storing contact message, rolled back");
            Ok((StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED).into_response())
        }
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/contact", get(contact_form).post(contact_submit))
}
