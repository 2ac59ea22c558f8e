//! Route handlers organized by page

pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod posts;
pub mod uploader;
