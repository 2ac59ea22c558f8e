//! Admin login, dashboard listing and logout

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{routing::get, Router};
use serde::Deserialize;

use crate::auth::{append_cookie, clear_cookie, AuthContext};
use crate::db::PostRepo;
use crate::http::{AppError, AppState};
use crate::render::View;

/// Shown on a failed login, whatever the reason
const LOGIN_ERROR: &str = "Invalid credentials";

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    pub uname: Option<String>,
    pub pass: Option<String>,
}

async fn dashboard_view(state: &AppState) -> Result<Response, AppError> {
    let posts = PostRepo::new(&state.pool).list_all().await?;
    state.render(&View::Dashboard { posts })
}

/// GET /dashboard - post list for the admin, login form for everyone else
async fn dashboard(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
) -> Result<Response, AppError> {
    if auth.is_admin() {
        return dashboard_view(&state).await;
    }
    state.render(&View::Login { error: None })
}

/// POST /dashboard - log in with `uname`/`pass`
async fn login(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if auth.is_admin() {
        return dashboard_view(&state).await;
    }

    let username = form.uname.unwrap_or_default();
    let password = form.pass.unwrap_or_default();

    match state.sessions.authenticate(&username, &password).await {
        Some(token) => {
            let mut response = dashboard_view(&state).await?;
            append_cookie(response.headers_mut(), token.set_cookie());
            Ok(response)
        }
        None => state.render(&View::Login {
            error: Some(LOGIN_ERROR.to_string()),
        }),
    }
}

/// GET /logout
async fn logout(State(state): State<Arc<AppState>>, auth: AuthContext) -> Response {
    if let Some(token) = &auth.token {
        state.sessions.logout(token).await;
    }
    ([(SET_COOKIE, clear_cookie())], Redirect::to("/dashboard")).into_response()
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(dashboard).post(login))
        .route("/logout", get(logout))
}
