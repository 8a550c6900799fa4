use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Experience;
use crate::database::store::{Order, Store};
use crate::middleware::AuthUser;
use crate::validate::{self, FieldErrors, FormFields};

const TABLE: &str = "experiences";

pub fn store() -> Store<Experience> {
    Store::new(TABLE)
}

/// Validated input for the create-or-update experience mutation.
/// An absent or empty end_date means "ongoing" and is stored as null;
/// end dates earlier than the start date are accepted as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceInput {
    pub id: Option<i64>,
    pub title: String,
    pub company: String,
    pub company_url: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: String,
}

impl ExperienceInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::optional_id(fields, "id", &mut errors);
        let title = validate::required_text(fields, "title", &mut errors);
        let company = validate::required_text(fields, "company", &mut errors);
        let company_url = validate::optional_text(fields, "company_url");
        let start_date = validate::required_date(fields, "start_date", &mut errors);
        let end_date = validate::nullable_date(fields, "end_date", &mut errors);
        let description = validate::required_text(fields, "description", &mut errors);
        errors.check(ExperienceInput {
            id,
            title: title.unwrap_or_default(),
            company: company.unwrap_or_default(),
            company_url,
            start_date: start_date.unwrap_or_default(),
            end_date,
            description: description.unwrap_or_default(),
        })
    }
}

pub async fn upsert(
    pool: &PgPool,
    owner: &AuthUser,
    input: &ExperienceInput,
) -> Result<(), DatabaseError> {
    let now = Utc::now();

    match input.id {
        None => {
            sqlx::query(
                "INSERT INTO experiences
                     (title, company, company_url, start_date, end_date, description,
                      user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)",
            )
            .bind(&input.title)
            .bind(&input.company)
            .bind(input.company_url.as_deref())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.description)
            .bind(owner.id)
            .bind(now)
            .execute(pool)
            .await?;
        }
        Some(id) => {
            sqlx::query(
                "INSERT INTO experiences
                     (id, title, company, company_url, start_date, end_date, description,
                      user_id, created_at, updated_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
                 ON CONFLICT (id) DO UPDATE SET
                     title = excluded.title,
                     company = excluded.company,
                     company_url = excluded.company_url,
                     start_date = excluded.start_date,
                     end_date = excluded.end_date,
                     description = excluded.description,
                     updated_at = excluded.updated_at",
            )
            .bind(id)
            .bind(&input.title)
            .bind(&input.company)
            .bind(input.company_url.as_deref())
            .bind(input.start_date)
            .bind(input.end_date)
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

pub async fn delete(pool: &PgPool, id: i64) -> Result<(), DatabaseError> {
    store().delete(pool, id).await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Experience>, DatabaseError> {
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

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            ("title", "Engineer"),
            ("company", "Acme"),
            ("start_date", "2020-01-15"),
            ("description", "Built things"),
        ]
    }

    #[test]
    fn omitted_end_date_means_ongoing() {
        let input = ExperienceInput::parse(&form(&base())).unwrap();
        assert_eq!(input.end_date, None);
        assert_eq!(input.company_url, None);
    }

    #[test]
    fn empty_end_date_also_means_ongoing() {
        let mut pairs = base();
        pairs.push(("end_date", ""));
        let input = ExperienceInput::parse(&form(&pairs)).unwrap();
        assert_eq!(input.end_date, None);
    }

    #[test]
    fn explicit_end_date_is_kept() {
        let mut pairs = base();
        pairs.push(("end_date", "2022-06-30"));
        pairs.push(("company_url", "https://acme.example"));
        let input = ExperienceInput::parse(&form(&pairs)).unwrap();
        assert!(input.end_date.is_some());
        assert_eq!(input.company_url.as_deref(), Some("https://acme.example"));
    }

    #[test]
    fn end_before_start_is_accepted_as_submitted() {
        let mut pairs = base();
        pairs.push(("end_date", "2019-01-01"));
        let input = ExperienceInput::parse(&form(&pairs)).unwrap();
        assert!(input.end_date.unwrap() < input.start_date);
    }

    #[test]
    fn missing_required_fields_all_reported() {
        let errors = ExperienceInput::parse(&form(&[])).unwrap_err();
        for field in ["title", "company", "start_date", "description"] {
            assert!(errors.get(field).is_some(), "expected error for {field}");
        }
        assert_eq!(errors.len(), 4);
    }
}
