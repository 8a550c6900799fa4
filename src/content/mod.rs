//! Content management data layer: per-entity input contracts, upserts,
//! deletes and loaders. Every mutation follows the same shape:
//! validation, then the explicit owner context, then a single atomic
//! conditional write against the store.

pub mod bio;
pub mod experiences;
pub mod posts;
pub mod projects;
pub mod social_media;

use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::validate::{self, FieldErrors, FormFields};

/// Input contract shared by every delete mutation: a required row id
/// submitted as a hidden form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteInput {
    pub id: i64,
}

impl DeleteInput {
    pub fn parse(fields: &FormFields) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let id = validate::required_id(fields, "id", &mut errors);
        errors.check(DeleteInput {
            id: id.unwrap_or_default(),
        })
    }
}

/// Keep the id sequence ahead of explicitly-supplied ids so later
/// sequence-assigned inserts never collide with them. Tables are
/// compile-time constants from the content modules.
pub(crate) async fn bump_sequence(pool: &PgPool, table: &'static str) -> Result<(), DatabaseError> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
         (SELECT GREATEST(MAX(id), 1) FROM \"{table}\"), true)"
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
