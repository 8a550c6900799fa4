use axum::{extract::Form, Extension};
use serde_json::Value;

use crate::content::{self, posts::PostInput, DeleteInput};
use crate::database::models::Post;
use crate::database::DatabaseManager;
use crate::middleware::{response::ok_body, ApiResponse, ApiResult, AuthUser};
use crate::validate::FormFields;

/// GET /dashboard/posts - every post, drafts included
pub async fn list(Extension(_user): Extension<AuthUser>) -> ApiResult<Vec<Post>> {
    let pool = DatabaseManager::pool().await?;
    let posts = content::posts::list_all(&pool).await?;
    Ok(ApiResponse::success(posts))
}

/// POST /dashboard/posts - create-or-update a post
pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = PostInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::posts::upsert(&pool, &user, &input).await?;
    Ok(ApiResponse::success(ok_body()))
}

/// POST /dashboard/posts/delete - remove a post by id
pub async fn delete(
    Extension(_user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = DeleteInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::posts::delete(&pool, input.id).await?;
    Ok(ApiResponse::success(ok_body()))
}
