//! Public pages: home listing, post detail, about, and the full archive

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{Redirect, Response};
use axum::{routing::get, Router};

use crate::db::PostRepo;
use crate::http::{AppError, AppState};
use crate::models::{PageWindow, Pagination, PaginationParams};
use crate::render::{PageInfo, View};

/// Page size of the `/posts` archive
const ARCHIVE_PER_PAGE: u32 = 5;

/// GET /?page=N - posts in id order, `site.posts_per_page` per page
async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let posts = PostRepo::new(&state.pool).list_all().await?;
    let window = PageWindow::compute(
        posts.len(),
        state.config.site.posts_per_page,
        params.page_number(),
    );

    state.render(&View::Index {
        posts: window.slice(&posts).to_vec(),
        prev: window.prev.href("/"),
        next: window.next.href("/"),
    })
}

/// GET /post/{slug}/ - an unknown slug renders the page with no post
async fn post_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let post = PostRepo::new(&state.pool).get_by_slug(&slug).await?;
    if post.is_none() {
        tracing::debug!(%slug, "no post for slug");
    }
    state.render(&View::Post { post })
}

/// GET /post/{slug} - permanent redirect to the canonical trailing-slash form
async fn post_add_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

/// GET /about
async fn about(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    state.render(&View::About)
}

/// GET /posts?page=N
async fn archive(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, AppError> {
    let page = Pagination::new(params.page_number(), ARCHIVE_PER_PAGE);
    let result = PostRepo::new(&state.pool).list(page).await?;
    let pagination = PageInfo::from(&result);

    state.render(&View::AllPosts {
        posts: result.items,
        pagination,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/post/{slug}", get(post_add_slash))
        .route("/post/{slug}/", get(post_detail))
        .route("/about", get(about))
        .route("/posts", get(archive))
}
