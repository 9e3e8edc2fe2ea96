//! Application state shared across handlers

use std::sync::Arc;

use crate::db::ExpenseStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Box<dyn ExpenseStore>,
}

impl AppState {
    pub fn new(store: impl ExpenseStore + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Box::new(store),
            }),
        }
    }

    pub fn store(&self) -> &dyn ExpenseStore {
        self.inner.store.as_ref()
    }
}
