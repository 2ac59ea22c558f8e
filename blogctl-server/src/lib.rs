//! blogctl-server: HTTP backend for a small personal blog
//!
//! Serves the public post listing, post pages and contact form, plus a
//! single-admin dashboard for editing posts and uploading images.

pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod render;
pub mod upload;

pub use config::BlogConfig;
pub use http::{build_router, run_server, AppState};
