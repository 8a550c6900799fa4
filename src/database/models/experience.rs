use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A work entry. `end_date` of None is the first-class "ongoing" state,
/// not missing data.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Experience {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub company_url: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Option<i64>,
}

impl Experience {
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}
