//! Domain models shared by the record store and the route handlers

pub mod contact;
pub mod pagination;
pub mod post;

pub use contact::{ContactMessage, NewContact};
pub use pagination::{NavToken, PageWindow, Paginated, Pagination, PaginationParams};
pub use post::{EditTarget, Post, PostDraft};
