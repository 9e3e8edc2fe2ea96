//! PostgreSQL expense repository
//!
//! One parameterized statement per operation against the `expenses` table.
//! Tags travel as `TEXT[]`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{DbError, ExpenseStore};
use crate::models::Expense;

const INSERT_EXPENSE: &str =
    "INSERT INTO expenses (title, amount, note, tags) VALUES ($1, $2, $3, $4) RETURNING id";
const SELECT_EXPENSE: &str = "SELECT id, title, amount, note, tags FROM expenses WHERE id = $1";
const SELECT_EXPENSES: &str = "SELECT id, title, amount, note, tags FROM expenses ORDER BY id ASC";
const UPDATE_EXPENSE: &str =
    "UPDATE expenses SET title = $2, amount = $3, note = $4, tags = $5 WHERE id = $1";

/// Row as stored. Columns are nullable in the schema; NULLs decode to
/// zero values, and a NULL tag array to an empty list.
#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: i64,
    title: Option<String>,
    amount: Option<f64>,
    note: Option<String>,
    tags: Option<Vec<String>>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            title: row.title.unwrap_or_default(),
            amount: row.amount.unwrap_or_default(),
            note: row.note.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
        }
    }
}

/// Expense repository over a shared pool
#[derive(Clone)]
pub struct PgExpenseRepo {
    pool: PgPool,
}

impl PgExpenseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseStore for PgExpenseRepo {
    async fn create(&self, mut expense: Expense) -> Result<Expense, DbError> {
        let id: i64 = sqlx::query_scalar(INSERT_EXPENSE)
            .bind(&expense.title)
            .bind(expense.amount)
            .bind(&expense.note)
            .bind(&expense.tags)
            .fetch_one(&self.pool)
            .await?;

        expense.id = id;
        tracing::debug!(id, "Inserted expense");
        Ok(expense)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Expense>, DbError> {
        let row: Option<ExpenseRow> = sqlx::query_as(SELECT_EXPENSE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Expense::from))
    }

    async fn list_all(&self) -> Result<Vec<Expense>, DbError> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(SELECT_EXPENSES)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Expense::from).collect())
    }

    async fn update(&self, expense: Expense) -> Result<Expense, DbError> {
        sqlx::query(UPDATE_EXPENSE)
            .bind(expense.id)
            .bind(&expense.title)
            .bind(expense.amount)
            .bind(&expense.note)
            .bind(&expense.tags)
            .execute(&self.pool)
            .await?;

        Ok(expense)
    }
}
