use axum::{extract::Form, Extension};
use serde_json::Value;

use crate::content::{self, projects::ProjectInput, DeleteInput};
use crate::database::models::Project;
use crate::database::DatabaseManager;
use crate::middleware::{response::ok_body, ApiResponse, ApiResult, AuthUser};
use crate::validate::FormFields;

/// GET /dashboard/projects
pub async fn list(Extension(_user): Extension<AuthUser>) -> ApiResult<Vec<Project>> {
    let pool = DatabaseManager::pool().await?;
    let projects = content::projects::list_all(&pool).await?;
    Ok(ApiResponse::success(projects))
}

/// POST /dashboard/projects - create-or-update a project
pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = ProjectInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::projects::upsert(&pool, &user, &input).await?;
    Ok(ApiResponse::success(ok_body()))
}

/// POST /dashboard/projects/delete - remove a project by id
pub async fn delete(
    Extension(_user): Extension<AuthUser>,
    Form(fields): Form<FormFields>,
) -> ApiResult<Value> {
    let input = DeleteInput::parse(&fields)?;
    let pool = DatabaseManager::pool().await?;
    content::projects::delete(&pool, input.id).await?;
    Ok(ApiResponse::success(ok_body()))
}
