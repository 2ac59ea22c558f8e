//! Repository implementations for database access
//!
//! Each repository borrows the pool and wraps every write in its own
//! transaction.

pub mod contacts;
pub mod posts;

pub use contacts::ContactRepo;
pub use posts::PostRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
