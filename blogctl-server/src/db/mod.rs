//! Database layer - connection pool and repositories
//!
//! - SQLite through a sqlx pool (max 5 connections)
//! - One transaction per mutation; dropping an uncommitted transaction rolls it back
//! - Not-found lookups return `None`, the handlers decide how to render them

pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, run_migrations};
pub use repos::*;
