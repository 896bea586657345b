//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::ContactStore;

/// Handle to the contact store, cheap to clone into every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new<S: ContactStore>(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Use an already shared store, e.g. one a test keeps a handle to.
    #[must_use]
    pub fn from_arc(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &dyn ContactStore {
        self.store.as_ref()
    }
}
