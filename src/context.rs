use std::sync::Arc;

use tracing::info;

use crate::config::{Config, ConfigError};
use crate::notify::TracingNotifier;
use crate::services::{CartStore, HttpStockService};
use crate::storage::FileCartStorage;

/// Application context holding the one shared [`CartStore`].
///
/// UI call sites clone the context instead of threading the store through
/// parameters. Construction is explicit; a context cannot exist without an
/// initialized store, so there is no silently-empty pre-initialization
/// state.
#[derive(Clone)]
pub struct CartContext {
    store: Arc<CartStore>,
}

impl CartContext {
    /// Wire the production collaborators from `config` and restore the
    /// persisted cart: file-backed storage, HTTP catalog client, and the
    /// tracing notifier.
    pub async fn initialize(config: &Config) -> Result<Self, ConfigError> {
        info!(
            "Initializing cart context (catalog: {}, storage: {})",
            config.catalog.catalog_base_url, config.storage.storage_dir
        );

        let stock = Arc::new(HttpStockService::new(config.catalog.catalog_base_url.clone()));
        let storage = Arc::new(FileCartStorage::new(config.storage.storage_dir.clone()));
        let notifier = Arc::new(TracingNotifier);

        let store = CartStore::initialize(
            stock,
            storage,
            notifier,
            config.storage.storage_key.clone(),
        )
        .await;

        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Wrap an already-built store (custom collaborators, tests).
    pub fn with_store(store: Arc<CartStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }
}
