//! Domain models and input validation
//!
//! Request bodies are bound into these types before any storage call.
//! Invalid input returns ValidationError, not panic.

pub mod expense;
pub mod validation;

pub use expense::Expense;
pub use validation::ValidationError;
