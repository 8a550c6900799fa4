use chrono::Utc;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{SocialMedia, SocialPlatform};
use crate::database::store::{Order, Store};
use crate::middleware::AuthUser;
use crate::validate::{self, FieldErrors, FormFields};

const TABLE: &str = "social_media";

pub fn store() -> Store<SocialMedia> {
    Store::new(TABLE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialMediaInput {
    pub id: Option<i64>,
    pub platform: SocialPlatform,
    pub url: String,
}

impl SocialMediaInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::optional_id(fields, "id", &mut errors);
        let platform = validate::required_platform(fields, "platform", &mut errors);
        let url = validate::required_url(fields, "url", &mut errors);
        errors.check(SocialMediaInput {
            id,
            platform: platform.unwrap_or(SocialPlatform::X),
            url: url.unwrap_or_default(),
        })
    }
}

pub async fn upsert(
    pool: &PgPool,
    owner: &AuthUser,
    input: &SocialMediaInput,
) -> Result<(), DatabaseError> {
    let now = Utc::now();

    match input.id {
        None => {
            sqlx::query(
                "INSERT INTO social_media (platform, url, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $4)",
            )
            .bind(input.platform.as_str())
            .bind(&input.url)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO social_media (id, platform, url, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $5)
                 ON CONFLICT (id) DO UPDATE SET
                     platform = excluded.platform,
                     url = excluded.url,
                     updated_at = excluded.updated_at",
            )
            .bind(id)
            .bind(input.platform.as_str())
            .bind(&input.url)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
            super::bump_sequence(pool, TABLE).await?;
        }
    }

    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), DatabaseError> {
    store().delete(pool, id).await
}

/// Dashboard view: the owner's links
pub async fn list_by_owner(
    pool: &PgPool,
    owner: &AuthUser,
) -> Result<Vec<SocialMedia>, DatabaseError> {
    store().list_by_owner(pool, owner.id, Order::IdAsc).await
}

/// Public homepage: newest links first
pub async fn list_newest_first(pool: &PgPool) -> Result<Vec<SocialMedia>, DatabaseError> {
    store().list_all(pool, Order::IdDesc).await
}
