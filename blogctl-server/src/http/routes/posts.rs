//! Admin post editing: create, update and delete
//!
//! Every route here sends anonymous visitors back to `/dashboard`.

use std::sync::Arc;

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Router};
use chrono::Utc;

use crate::auth::AuthContext;
use crate::db::PostRepo;
use crate::http::{AppError, AppState};
use crate::models::{EditTarget, PostDraft};
use crate::render::View;

const POST_NOT_FOUND: &str = "Post not found.";
const CREATE_FAILED: &str = "An error occurred while adding the post.";
const UPDATE_FAILED: &str = "An error occurred while updating the post.";

fn to_dashboard() -> Response {
    Redirect::to("/dashboard").into_response()
}

/// GET /edit/{id} - blank form for id 0, prefilled form otherwise
async fn edit_form(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(to_dashboard());
    }

    let view = match id.parse::<EditTarget>() {
        Ok(EditTarget::Create) => View::Edit { id: 0, post: None },
        Ok(EditTarget::Update(id)) => View::Edit {
            id,
            post: PostRepo::new(&state.pool).get(id).await?,
        },
        Err(_) => return Ok(POST_NOT_FOUND.into_response()),
    };

    state.render(&view)
}

/// POST /edit/{id} - create (id 0) or overwrite a post
async fn edit_submit(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
    Form(draft): Form<PostDraft>,
) -> Response {
    if !auth.is_admin() {
        return to_dashboard();
    }

    let Ok(target) = id.parse::<EditTarget>() else {
        return POST_NOT_FOUND.into_response();
    };

    let repo = PostRepo::new(&state.pool);
    let now = Utc::now();

    match target {
        EditTarget::Create => match repo.create(&draft, now).await {
            Ok(post) => {
                tracing::info!(id = post.id, slug = %post.slug, "post created");
                to_dashboard()
            }
            Err(e) => {
                tracing::error!(error = %e, "error while adding post, rolled back");
                (StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED).into_response()
            }
        },
        EditTarget::Update(id) => match repo.update(id, &draft, now).await {
            Ok(Some(_)) => {
                tracing::info!(id, "post updated");
                Redirect::to(&format!("/edit/{}", target.path_id())).into_response()
            }
            Ok(None) => POST_NOT_FOUND.into_response(),
            Err(e) => {
                tracing::error!(id, error = %e, "error while updating post, rolled back");
                (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED).into_response()
            }
        },
    }
}

/// GET|POST /delete/{id} - unknown or malformed ids are ignored
async fn delete_post(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    if !auth.is_admin() {
        return Ok(to_dashboard());
    }

    if let Ok(id) = id.parse::<i64>() {
        if PostRepo::new(&state.pool).delete(id).await? {
            tracing::info!(id, "post deleted");
        }
    }

    Ok(to_dashboard())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/edit/{id}", get(edit_form).post(edit_submit))
        .route("/delete/{id}", get(delete_post).post(delete_post))
}
