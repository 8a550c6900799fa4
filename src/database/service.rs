use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Find the user matching any of the given emails. Match order is the
/// table's, not the caller's: any verified provider email may hit.
pub async fn find_user_by_emails(
    pool: &PgPool,
    emails: &[String],
) -> Result<Option<User>, DatabaseError> {
    if emails.is_empty() {
        return Ok(None);
    }

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, avatar, created_at, updated_at
         FROM users
         WHERE email = ANY($1)
         ORDER BY id ASC
         LIMIT 1",
    )
    .bind(emails)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Refresh the cached provider profile on every successful login
pub async fn refresh_user_profile(
    pool: &PgPool,
    user_id: i64,
    name: &str,
    avatar: Option<&str>,
) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(
        "UPDATE users
         SET name = $1, avatar = $2, updated_at = now()
         WHERE id = $3
         RETURNING id, name, email, avatar, created_at, updated_at",
    )
    .bind(name)
    .bind(avatar)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
