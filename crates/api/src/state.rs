//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{CatalogConfig, StoreBackend};
use crate::db::{ConnectionProvider, MemoryProductStore, PgProductStore, ProductStore};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("CATALOG_DATABASE_URL is required for the postgres store")]
    MissingDatabaseUrl,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// product store, which in turn owns the single memoized connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    products: Arc<dyn ProductStore>,
}

impl AppState {
    /// Create application state around an existing store.
    #[must_use]
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { products }),
        }
    }

    /// Build the store selected by `config`.
    ///
    /// The `PostgreSQL` store does not connect here; the pool is created on
    /// the first request that needs it.
    ///
    /// # Errors
    ///
    /// Returns `StateError::MissingDatabaseUrl` if the postgres store is
    /// selected without a database URL.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, StateError> {
        let products: Arc<dyn ProductStore> = match config.store {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .clone()
                    .ok_or(StateError::MissingDatabaseUrl)?;
                Arc::new(PgProductStore::new(ConnectionProvider::new(url)))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory product store; data will not persist");
                Arc::new(MemoryProductStore::new())
            }
        };

        Ok(Self::new(products))
    }

    /// Get the product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }
}
