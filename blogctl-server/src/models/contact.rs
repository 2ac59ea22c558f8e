//! Visitor messages from the contact form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored contact message
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub message: String,
    pub email: String,
    pub date: Option<DateTime<Utc>>,
}

/// Contact form submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}
