//! Application state for the forms API

use form_core::FormStore;
use tokio::sync::RwLock;

/// One store shared by every request.
///
/// Write handlers hold the write guard for the whole operation, which keeps
/// access-key allocation and check-then-upsert submissions atomic.
pub struct AppState {
    pub store: RwLock<FormStore>,
}

impl AppState {
    pub fn new(seed: bool) -> Self {
        let store = if seed {
            tracing::info!("Seeding store with demo templates");
            FormStore::init()
        } else {
            FormStore::new()
        };

        Self::with_store(store)
    }

    pub fn with_store(store: FormStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}
