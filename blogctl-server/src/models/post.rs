//! Blog post records and the edit-form target

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Post record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub tagline: Option<String>,
    pub img_file: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

/// Mutable post fields as submitted by the edit form.
///
/// Every field is optional at this layer; the table's NOT NULL constraints
/// decide whether a draft can be committed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    pub title: Option<String>,
    #[serde(rename = "tline")]
    pub tagline: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub img_file: Option<String>,
}

/// What an `/edit/{id}` request operates on.
///
/// Id `0` on the form means "new post".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Update(i64),
}

/// Edit path segment that is neither `0` nor a post id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid post id '{0}'")]
pub struct InvalidPostId(pub String);

impl FromStr for EditTarget {
    type Err = InvalidPostId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(0) => Ok(Self::Create),
            Ok(id) if id > 0 => Ok(Self::Update(id)),
            _ => Err(InvalidPostId(s.to_owned())),
        }
    }
}

impl EditTarget {
    /// Path segment used in `/edit/{id}` links.
    pub fn path_id(&self) -> i64 {
        match self {
            Self::Create => 0,
            Self::Update(id) => *id,
        }
    }
}
