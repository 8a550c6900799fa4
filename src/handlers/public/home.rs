use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::format;
use crate::content;
use crate::database::models::{Bio, Experience, Post, Project, SocialMedia};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};

/// Everything the public homepage renders in one payload
#[derive(Debug, Serialize)]
pub struct HomePayload {
    pub bio: Option<Bio>,
    /// Newest links first
    pub social_media: Vec<SocialMedia>,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub posts: Vec<PostListItem>,
}

#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub date: String,
    pub read_time_minutes: u32,
}

impl From<Post> for PostListItem {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            status: post.status,
            date: format::format_date_compact(post.created_at),
            read_time_minutes: format::read_time_minutes(&post.content),
            created_at: post.created_at,
        }
    }
}

/// GET / - public homepage payload
pub async fn home() -> ApiResult<HomePayload> {
    let pool = DatabaseManager::pool().await?;

    let bio = content::bio::find_current(&pool).await?;
    let social_media = content::social_media::list_newest_first(&pool).await?;
    let experiences = content::experiences::list_all(&pool).await?;
    let projects = content::projects::list_all(&pool).await?;
    let posts = content::posts::list_all(&pool)
        .await?
        .into_iter()
        .map(PostListItem::from)
        .collect();

    Ok(ApiResponse::success(HomePayload {
        bio,
        social_media,
        experiences,
        projects,
        posts,
    }))
}
