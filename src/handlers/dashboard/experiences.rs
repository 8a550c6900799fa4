use axum::{extract::Form, Extension};
use serde_json::Value;

use crate::content::{self, experiences::ExperienceInput, DeleteInput};
use crate::database::models::Experience;
use crate::database::DatabaseManager;
use crate::middleware::{response::ok_body, ApiResponse, ApiResult, AuthUser};
use crate::validate::FormFields;

/// GET /dashboard/experiences
pub async fn list(Extension(_user): Extension<AuthUser>) -> ApiResult<Vec<Experience>> {
    let pool = DatabaseManager::pool().await?;
    let experiences = content::experiences::list_all(&pool).await?;
    Ok(ApiResponse::success(experiences))
}

/// POST /dashboard/experiences - create-or-update an experience
pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = ExperienceInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::experiences::upsert(&pool, &user, &input).await?;
    Ok(ApiResponse::success(ok_body()))
}

/// POST /dashboard/experiences/delete - remove an experience by id
pub async fn delete(
    Extension(_user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = DeleteInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::experiences::delete(&pool, input.id).await?;
    Ok(ApiResponse::success(ok_body()))
}
