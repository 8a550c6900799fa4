use chrono::Utc;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Post, PostStatus};
use crate::database::store::{Order, Store};
use crate::middleware::AuthUser;
use crate::validate::{self, FieldErrors, FormFields};

const TABLE: &str = "posts";

pub fn store() -> Store<Post> {
    Store::new(TABLE)
}

/// Validated input for the create-or-update post mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub publish: bool,
}

impl PostInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::optional_id(fields, "id", &mut errors);
        let title = validate::required_text(fields, "title", &mut errors);
        let content = validate::required_text(fields, "content", &mut errors);
        let publish = validate::checkbox(fields, "publish");
        errors.check(PostInput {
            id,
            title: title.unwrap_or_default(),
            content: content.unwrap_or_default(),
            publish,
        })
    }

    pub fn status(&self) -> PostStatus {
        PostStatus::from_publish_flag(self.publish)
    }
}

/// Create-or-update keyed by the optional id. With an id this is a single
/// atomic conditional write; a concurrent delete between conflict check
/// and update degrades to an insert, leaving the submitted fields in place.
pub async fn upsert(pool: &PgPool, owner: &AuthUser, input: &PostInput) -> Result<(), DatabaseError> {
    let now = Utc::now();
    let status = input.status();

    match input.id {
        None => {
            sqlx::query(
                "INSERT INTO posts (title, content, status, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $5)",
            )
            .bind(&input.title)
            .bind(&input.content)
            .bind(status.as_str())
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO posts (id, title, content, status, user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $6)
                 ON CONFLICT (id) DO UPDATE SET
                     title = excluded.title,
                     content = excluded.content,
                     status = excluded.status,
                     updated_at = excluded.updated_at",
            )
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(status.as_str())
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

pub async fn list_all(pool: &PgPool) -> Result<Vec<Post>, DatabaseError> {
    store().list_all(pool, Order::IdAsc).await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Post>, DatabaseError> {
    store().find_by_id(pool, id).await
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
    fn missing_title_and_content_reported_together() {
        let errors = PostInput::parse(&form(&[("publish", "on")])).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("title").is_some());
        assert!(errors.get("content").is_some());
    }

    #[test]
    fn publish_flag_drives_status() {
        let input =
            PostInput::parse(&form(&[("title", "Hello"), ("content", "world")])).unwrap();
        assert_eq!(input.status(), PostStatus::Draft);
        assert_eq!(input.id, None);

        let input = PostInput::parse(&form(&[
            ("id", "12"),
            ("title", "Hello"),
            ("content", "world"),
            ("publish", "on"),
        ]))
        .unwrap();
        assert_eq!(input.status(), PostStatus::Published);
        assert_eq!(input.id, Some(12));
    }

    #[test]
    fn malformed_hidden_id_is_a_field_error() {
        let errors = PostInput::parse(&form(&[
            ("id", "seven"),
            ("title", "Hello"),
            ("content", "world"),
        ]))
        .unwrap_err();
        assert!(errors.get("id").is_some());
        assert_eq!(errors.len(), 1);
    }
}
