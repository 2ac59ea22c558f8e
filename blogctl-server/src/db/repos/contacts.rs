//! Contact message repository

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::DbError;
use crate::models::{ContactMessage, NewContact};

/// Contact message repository
pub struct ContactRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a submission as-is.
    pub async fn create(
        &self,
        contact: &NewContact,
        date: DateTime<Utc>,
    ) -> Result<ContactMessage, DbError> {
        let mut tx = self.pool.begin().await?;

        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contacts (name, phone, message, email, date)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, phone, message, email, date
            "#,
        )
        .bind(contact.name.as_deref())
        .bind(contact.phone.as_deref())
        .bind(contact.message.as_deref())
        .bind(contact.email.as_deref())
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// All stored messages, oldest first.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, DbError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, phone, message, email, date FROM contacts ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(messages)
    }
}
