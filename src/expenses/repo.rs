use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Expense record in the database. Owned exclusively by `owner_email`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub owner_email: String,
    pub category: String,
    pub amount: f64,
    pub expense_date: String,
    pub created_at: OffsetDateTime,
}

impl Expense {
    pub async fn insert(
        db: &PgPool,
        owner_email: &str,
        category: &str,
        amount: f64,
        date: &str,
    ) -> anyhow::Result<Expense> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (owner_email, category, amount, expense_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_email, category, amount, expense_date, created_at
            "#,
        )
        .bind(owner_email)
        .bind(category)
        .bind(amount)
        .bind(date)
        .fetch_one(db)
        .await?;
        Ok(expense)
    }

    /// One owner's expenses in insertion order (`created_at`, `id` as the
    /// tiebreak), so a fixed store state always lists the same way.
    pub async fn list_by_owner(db: &PgPool, owner_email: &str) -> anyhow::Result<Vec<Expense>> {
        let rows = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, owner_email, category, amount, expense_date, created_at
            FROM expenses
            WHERE owner_email = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(owner_email)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Sum of one owner's expense amounts; 0 when there are none.
    pub async fn sum_for_owner(db: &PgPool, owner_email: &str) -> anyhow::Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE owner_email = $1
            "#,
        )
        .bind(owner_email)
        .fetch_one(db)
        .await?;
        Ok(total)
    }
}
