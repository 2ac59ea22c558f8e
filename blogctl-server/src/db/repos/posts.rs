//! Post repository
//!
//! Listing is in primary-key order; slugs are not unique, so a slug lookup
//! returns the oldest matching post.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::DbError;
use crate::models::{Paginated, Pagination, Post, PostDraft};

const POST_COLUMNS: &str = "id, title, slug, content, tagline, img_file, date";

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id ASC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(posts)
    }

    /// One page of posts pushed down to SQL.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<Post>, DbError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;

        let items = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY id ASC LIMIT ? OFFSET ?"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Post>, DbError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// First post carrying `slug`.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DbError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = ? ORDER BY id ASC LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;
        Ok(post)
    }

    /// Insert a new post dated `date`.
    ///
    /// Missing title, slug or content violate NOT NULL and fail the insert;
    /// the transaction is rolled back when dropped.
    pub async fn create(&self, draft: &PostDraft, date: DateTime<Utc>) -> Result<Post, DbError> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (title, slug, content, tagline, img_file, date)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(draft.title.as_deref())
        .bind(draft.slug.as_deref())
        .bind(draft.content.as_deref())
        .bind(draft.tagline.as_deref())
        .bind(draft.img_file.as_deref())
        .bind(date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(post)
    }

    /// Overwrite every mutable field of post `id`.
    ///
    /// Returns `Ok(None)` when no such post exists.
    pub async fn update(
        &self,
        id: i64,
        draft: &PostDraft,
        date: DateTime<Utc>,
    ) -> Result<Option<Post>, DbError> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = ?, tagline = ?, slug = ?, content = ?, img_file = ?, date = ?
            WHERE id = ?
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(draft.title.as_deref())
        .bind(draft.tagline.as_deref())
        .bind(draft.slug.as_deref())
        .bind(draft.content.as_deref())
        .bind(draft.img_file.as_deref())
        .bind(date)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(post)
    }

    /// Delete post `id`. Returns whether a row was removed; a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
