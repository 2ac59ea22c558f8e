//! HTTP server layer
//!
//! Axum server with:
//! - Request tracing
//! - Graceful shutdown
//! - Plaintext error responses, details only in the log

pub mod error;
pub mod routes;
pub mod server;

pub use error::AppError;
pub use server::{build_router, run_server, AppState, ServerError};
