//! View layer seam
//!
//! Handlers never build HTML. They produce a [`View`] naming the template
//! and its context, and a [`Renderer`] turns it into a response body. The
//! bundled [`JsonRenderer`] emits the context as JSON for an external
//! template engine or frontend to consume.

use serde::Serialize;

use crate::config::SiteParams;
use crate::models::{Paginated, Post};

/// Template plus context for one page
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum View {
    Index {
        posts: Vec<Post>,
        prev: String,
        next: String,
    },
    Post {
        post: Option<Post>,
    },
    About,
    Login {
        error: Option<String>,
    },
    Dashboard {
        posts: Vec<Post>,
    },
    AllPosts {
        posts: Vec<Post>,
        pagination: PageInfo,
    },
    Contact {
        sent: bool,
    },
    Edit {
        id: i64,
        post: Option<Post>,
    },
}

impl View {
    /// Template file the view is meant for.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Index { .. } => "index.html",
            Self::Post { .. } => "post.html",
            Self::About => "about.html",
            Self::Login { .. } => "login.html",
            Self::Dashboard { .. } => "dashboard.html",
            Self::AllPosts { .. } => "allpost.html",
            Self::Contact { .. } => "contact.html",
            Self::Edit { .. } => "edit.html",
        }
    }
}

/// Navigation data for the `/posts` listing
#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_num: Option<u32>,
    pub next_num: Option<u32>,
}

impl<T> From<&Paginated<T>> for PageInfo {
    fn from(p: &Paginated<T>) -> Self {
        Self {
            page: p.page,
            per_page: p.per_page,
            total: p.total,
            pages: p.total_pages(),
            has_prev: p.has_prev(),
            has_next: p.has_next(),
            prev_num: p.prev_num(),
            next_num: p.next_num(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize view context: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Turns views into response bodies.
pub trait Renderer: Send + Sync + 'static {
    /// `Content-Type` of rendered bodies.
    fn content_type(&self) -> &'static str;

    fn render(&self, params: &SiteParams, view: &View) -> Result<String, RenderError>;
}

/// Renders `{"template": ..., "params": ..., "context": ...}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct Page<'a> {
    template: &'static str,
    params: &'a SiteParams,
    context: &'a View,
}

impl Renderer for JsonRenderer {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn render(&self, params: &SiteParams, view: &View) -> Result<String, RenderError> {
        let page = Page {
            template: view.template(),
            params,
            context: view,
        };
        Ok(serde_json::to_string(&page)?)
    }
}
