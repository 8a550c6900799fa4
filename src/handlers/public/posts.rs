use axum::extract::Path;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::format;
use crate::content;
use crate::database::models::Post;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub status: String,
    /// Markdown body
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub read_time_minutes: u32,
}

impl From<Post> for PostDetail {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            status: post.status,
            read_time_minutes: format::read_time_minutes(&post.content),
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Route identifiers must be positive integers; anything else is a 404
/// before the store is ever touched.
pub fn parse_post_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// GET /posts/:id - public post detail
pub async fn detail(Path(id): Path<String>) -> ApiResult<PostDetail> {
    let id = parse_post_id(&id).ok_or_else(|| ApiError::not_found("Post not found"))?;

    let pool = DatabaseManager::pool().await?;
    let post = content::posts::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    Ok(ApiResponse::success(post.into()))
}
