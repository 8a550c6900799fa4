use chrono::Utc;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Bio;
use crate::database::store::Store;
use crate::middleware::AuthUser;
use crate::validate::{self, FieldErrors, FormFields};

const TABLE: &str = "bio";

pub fn store() -> Store<Bio> {
    Store::new(TABLE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioInput {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl BioInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::optional_id(fields, "id", &mut errors);
        let name = validate::required_text(fields, "name", &mut errors);
        let description = validate::required_text(fields, "description", &mut errors);
        errors.check(BioInput {
            id,
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
        })
    }
}

pub async fn upsert(pool: &PgPool, owner: &AuthUser, input: &BioInput) -> Result<(), DatabaseError> {
    let now = Utc::now();

    match input.id {
        None => {
            sqlx::query(
                "INSERT INTO bio (name, description, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $4)",
            )
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO bio (id, name, description, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $5)
                 ON CONFLICT (id) DO UPDATE SET
                     name = excluded.name,
                     description = excluded.description,
                     updated_at = excluded.updated_at",
            )
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
            super::bump_sequence(pool, TABLE).await?;
        }
    }

    Ok(())
}

/// Dashboard view: the owner's current bio row
pub async fn find_by_owner(pool: &PgPool, owner: &AuthUser) -> Result<Option<Bio>, DatabaseError> {
    store().find_one_by_owner(pool, owner.id).await
}

/// Public homepage: the site bio (single-owner deployment)
pub async fn find_current(pool: &PgPool) -> Result<Option<Bio>, DatabaseError> {
    store().find_first(pool).await
}
