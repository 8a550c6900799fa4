//! Dashboard index: the owner's bio and social links.

use axum::{extract::Form, Extension};
use serde::Serialize;
use serde_json::Value;

use crate::content::{self, bio::BioInput, social_media::SocialMediaInput, DeleteInput};
use crate::database::models::{Bio, SocialMedia};
use crate::database::DatabaseManager;
use crate::middleware::{response::ok_body, ApiResponse, ApiResult, AuthUser};
use crate::validate::FormFields;

#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub bio: Option<Bio>,
    pub social_media: Vec<SocialMedia>,
}

/// GET /dashboard - owner-scoped bio and social links
pub async fn view(Extension(user): Extension<AuthUser>) -> ApiResult<ProfilePayload> {
    let pool = DatabaseManager::pool().await?;
    let bio = content::bio::find_by_owner(&pool, &user).await?;
    let social_media = content::social_media::list_by_owner(&pool, &user).await?;
    Ok(ApiResponse::success(ProfilePayload { bio, social_media }))
}

/// POST /dashboard/bio - create-or-update the bio
pub async fn upsert_bio(
    Extension(user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = BioInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::bio::upsert(&pool, &user, &input).await?;
    Ok(ApiResponse::success(ok_body()))
}

/// POST /dashboard/social - create-or-update a social link
pub async fn upsert_social(
    Extension(user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = SocialMediaInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::social_media::upsert(&pool, &user, &input).await?;
    Ok(ApiResponse::success(ok_body()))
}

/// POST /dashboard/social/delete - remove a social link by id
pub async fn delete_social(
    Extension(_user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = DeleteInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::social_media::delete(&pool, input.id).await?;
    Ok(ApiResponse::success(ok_body()))
}
