//! Expense storage
//!
//! `ExpenseStore` is the seam between the HTTP handlers and storage.
//! Every implementation follows the same contract:
//! - `get_by_id` reports a missing row as `Ok(None)`, never as an error
//! - `list_all` returns rows ordered by id ascending
//! - `update` does not report whether a row matched

use async_trait::async_trait;

use crate::models::Expense;

pub mod expenses;
pub mod memory;

pub use expenses::PgExpenseRepo;
pub use memory::MemoryExpenseRepo;

/// Database error type
///
/// Transparent over the driver error so client-visible messages carry the
/// driver text unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence operations for expenses.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert a new row and return the expense with its assigned id.
    async fn create(&self, expense: Expense) -> Result<Expense, DbError>;

    /// Look up a single expense by primary key.
    async fn get_by_id(&self, id: i64) -> Result<Option<Expense>, DbError>;

    /// All expenses, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<Expense>, DbError>;

    /// Replace title, amount, note and tags of the row matching `expense.id`.
    async fn update(&self, expense: Expense) -> Result<Expense, DbError>;
}
