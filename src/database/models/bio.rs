use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// At most one conceptually current row per owner; upserts are keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bio {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i64>,
}
