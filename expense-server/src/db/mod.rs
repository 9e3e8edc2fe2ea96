//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One shared connection pool, injected into the router state
//! - Parameterized SQL only, one statement per operation
//! - Driver errors propagate verbatim, no retries

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::create_pool;
pub use repos::{DbError, ExpenseStore, MemoryExpenseRepo, PgExpenseRepo};
