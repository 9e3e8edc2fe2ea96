//! In-memory expense repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DbError, ExpenseStore};
use crate::models::Expense;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Expense>,
}

/// Process-local storage backend.
///
/// Ids come from a sequence starting at 1 and rows are kept in id order,
/// matching the PostgreSQL repository. Data is lost when the last clone
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryExpenseRepo {
    table: Arc<RwLock<Table>>,
}

impl MemoryExpenseRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseStore for MemoryExpenseRepo {
    async fn create(&self, mut expense: Expense) -> Result<Expense, DbError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        expense.id = table.last_id;
        table.rows.insert(expense.id, expense.clone());
        Ok(expense)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Expense>, DbError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Expense>, DbError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, expense: Expense) -> Result<Expense, DbError> {
        // Like UPDATE ... WHERE id = $1, an unknown id is a silent no-op
        if let Some(row) = self.table.write().await.rows.get_mut(&expense.id) {
            *row = expense.clone();
        }
        Ok(expense)
    }
}
