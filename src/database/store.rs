use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;

/// Row ordering for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    IdAsc,
    /// Newest rows first; used by the public social-links loader
    IdDesc,
}

impl Order {
    fn sql(&self) -> &'static str {
        match self {
            Order::IdAsc => "id ASC",
            Order::IdDesc => "id DESC",
        }
    }
}

/// Typed per-table query facade.
///
/// Table names are compile-time constants owned by the content modules,
/// never request input, so interpolating them into SQL is safe.
pub struct Store<T> {
    table: &'static str,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Store<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub const fn new(table: &'static str) -> Self {
        Self {
            table,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn list_all(&self, pool: &PgPool, order: Order) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" ORDER BY {}",
            self.table,
            order.sql()
        );
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, pool: &PgPool, id: i64) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Single-row-per-owner lookup (Bio)
    pub async fn find_one_by_owner(
        &self,
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE user_id = $1 ORDER BY id ASC LIMIT 1",
            self.table
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn list_by_owner(
        &self,
        pool: &PgPool,
        user_id: i64,
        order: Order,
    ) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE user_id = $1 ORDER BY {}",
            self.table,
            order.sql()
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// First row overall, used by the public homepage for the bio section
    pub async fn find_first(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" ORDER BY id ASC LIMIT 1", self.table);
        let row = sqlx::query_as::<_, T>(&sql).fetch_optional(pool).await?;
        Ok(row)
    }

    /// Unconditional removal by id. Idempotent: deleting an id that does
    /// not exist is still a success.
    pub async fn delete(&self, pool: &PgPool, id: i64) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE id = $1", self.table);
        sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(())
    }
}
