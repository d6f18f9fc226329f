//! Seed the catalog with products from a JSON file.
//!
//! The file must hold a JSON array of product documents, e.g.
//!
//! ```json
//! [
//!   {"name": "Mug", "price": 9.99},
//!   {"name": "T-Shirt", "price": 25, "sizes": ["S", "M", "L"]}
//! ]
//! ```
//!
//! Any `_id` in the file is ignored; the store assigns fresh ids.

use std::path::Path;

use catalog_api::db::{PgProductStore, ProductStore};
use catalog_core::Product;
use tracing::info;

use super::{CommandError, connection_provider};

/// Parse a seed file's contents.
fn parse_products(content: &str) -> Result<Vec<Product>, CommandError> {
    let products: Vec<Product> = serde_json::from_str(content)?;
    Ok(products.into_iter().map(Product::without_id).collect())
}

/// Read and parse the seed file at `file_path`.
async fn read_products(file_path: &str) -> Result<Vec<Product>, CommandError> {
    let content = tokio::fs::read_to_string(Path::new(file_path))
        .await
        .map_err(|source| CommandError::Io {
            path: file_path.to_owned(),
            source,
        })?;
    parse_products(&content)
}

/// Insert every product from `file_path`. Returns the number inserted.
///
/// The file is parsed completely before connecting, so a malformed file
/// inserts nothing.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or any insert fails.
pub async fn products(file_path: &str) -> Result<usize, CommandError> {
    info!(path = %file_path, "Loading products from file");
    let products = read_products(file_path).await?;
    info!(count = products.len(), "Parsed seed file");

    let store = PgProductStore::new(connection_provider()?);
    let mut inserted = 0;
    for product in products {
        let stored = store.insert(product).await?;
        if let Some(id) = stored.id {
            info!(product_id = %id, name = %stored.name, "Inserted product");
        }
        inserted += 1;
    }

    Ok(inserted)
}
