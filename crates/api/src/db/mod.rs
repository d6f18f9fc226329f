//! Product persistence.
//!
//! # Database: `catalog`
//!
//! ## Tables
//!
//! - `catalog.product` - One JSONB document per product, keyed by a
//!   store-assigned UUID
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p catalog-cli -- migrate
//! ```
//!
//! # Stores
//!
//! Handlers only see the [`ProductStore`] trait. [`PgProductStore`] is the
//! production implementation; [`MemoryProductStore`] keeps everything in
//! process and backs the router tests and `CATALOG_STORE=memory`.

pub mod memory;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use catalog_core::{Product, ProductFilter, ProductId};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::sync::OnceCell;

pub use memory::MemoryProductStore;
pub use products::PgProductStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The first connection to the database could not be established.
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The `includes` filter is not a valid regular expression.
    #[error("invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// The five product operations plus a health probe.
///
/// Every method is a single, independent store operation. Implementations
/// return the record as the store holds it, so callers never rely on their
/// own input being mutated.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products matching `filter`, in the store's natural order.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// The product with `id`, if any.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a new product. Any id on `product` is ignored; the stored
    /// record with its assigned id is returned.
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// Replace the whole document of `id`. Returns `None` if no record matched.
    async fn replace(&self, id: ProductId, product: Product)
    -> Result<Option<Product>, StoreError>;

    /// Delete `id`. Returns whether a record was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Lazily creates the process-wide connection pool and hands it out.
///
/// The pool is created on the first call to [`client`](Self::client) and
/// reused by every later call. A failed first attempt is returned to that
/// caller and nothing is memoized, so the next call tries again.
#[derive(Debug)]
pub struct ConnectionProvider {
    database_url: SecretString,
    pool: OnceCell<PgPool>,
}

impl ConnectionProvider {
    /// Create a provider that connects on first use.
    #[must_use]
    pub fn new(database_url: SecretString) -> Self {
        Self {
            database_url,
            pool: OnceCell::new(),
        }
    }

    /// Get the shared pool, connecting if this is the first use.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connection` if the pool cannot be created.
    pub async fn client(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| {
                tracing::info!("Connecting to database");
                create_pool(&self.database_url)
            })
            .await
            .map_err(StoreError::Connection)
    }
}

#[cfg(test)]
impl ConnectionProvider {
    fn is_connected(&self) -> bool {
        self.pool.initialized()
    }
}
