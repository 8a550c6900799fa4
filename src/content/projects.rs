use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Project;
use crate::database::store::{Order, Store};
use crate::middleware::AuthUser;
use crate::validate::{self, FieldErrors, FormFields};

const TABLE: &str = "projects";

pub fn store() -> Store<Project> {
    Store::new(TABLE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub url: String,
}

impl ProjectInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::optional_id(fields, "id", &mut errors);
        let title = validate::required_text(fields, "title", &mut errors);
        let description = validate::required_text(fields, "description", &mut errors);
        let date = validate::required_date(fields, "date", &mut errors);
        let url = validate::required_text(fields, "url", &mut errors);
        errors.check(ProjectInput {
            id,
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            date: date.unwrap_or_default(),
            url: url.unwrap_or_default(),
        })
    }
}

pub async fn upsert(
    pool: &PgPool,
    owner: &AuthUser,
    input: &ProjectInput,
) -> Result<(), DatabaseError> {
    let now = Utc::now();

    match input.id {
        None => {
            sqlx::query(
                "INSERT INTO projects (title, description, date, url, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $6)",
            )
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.url)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO projects (id, title, description, date, url, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                 ON CONFLICT (id) DO UPDATE SET
                     title = excluded.title,
                     description = excluded.description,
                     date = excluded.date,
                     url = excluded.url,
                     updated_at = excluded.updated_at",
            )
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
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

pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, DatabaseError> {
    store().list_all(pool, Order::IdAsc).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn date_is_coerced_from_string() {
        let input = ProjectInput::parse(&form(&[
            ("title", "Folio"),
            ("description", "Portfolio app"),
            ("date", "2024-05-01"),
            ("url", "https://example.com/folio"),
        ]))
        .unwrap();
        assert_eq!(input.date.format("%Y-%m-%d").to_string(), "2024-05-01");
    }

    #[test]
    fn all_violations_reported_at_once() {
        let errors = ProjectInput::parse(&form(&[("date", "nope")])).unwrap_err();
        assert!(errors.get("title").is_some());
        assert!(errors.get("description").is_some());
        assert!(errors.get("date").is_some());
        assert!(errors.get("url").is_some());
        assert_eq!(errors.len(), 4);
    }
}
