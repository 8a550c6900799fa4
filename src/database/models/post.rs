use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// One of the PostStatus tokens; stored as text.
    pub status: String,
    /// Markdown body
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i64>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published.as_str()
    }
}

/// Publication state, derived solely from the submitted publish flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Draft,
}

impl PostStatus {
    pub fn from_publish_flag(publish: bool) -> Self {
        if publish {
            PostStatus::Published
        } else {
            PostStatus::Draft
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Draft => "draft",
        }
    }
}

impl FromStr for PostStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "published" => Ok(PostStatus::Published),
            "draft" => Ok(PostStatus::Draft),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_publish_flag() {
        assert_eq!(PostStatus::from_publish_flag(true), PostStatus::Published);
        assert_eq!(PostStatus::from_publish_flag(false), PostStatus::Draft);
    }
}
