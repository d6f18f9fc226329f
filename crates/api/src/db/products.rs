//! `PostgreSQL` product store.
//!
//! Each product is one row in `catalog.product`: the store-assigned `id`
//! column plus the rest of the product as a JSONB `document`. Filters are
//! evaluated against the document, natural order is insertion order.

use async_trait::async_trait;
use catalog_core::{Product, ProductFilter, ProductId};
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::instrument;

use super::{ConnectionProvider, ProductStore, StoreError};

/// Row shape shared by every query that returns products.
#[derive(FromRow)]
struct ProductRow {
    id: ProductId,
    document: Json<Product>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        row.document.0.with_id(row.id)
    }
}

/// Product store backed by `PostgreSQL`.
#[derive(Debug)]
pub struct PgProductStore {
    connections: ConnectionProvider,
}

impl PgProductStore {
    /// Create a store that obtains its pool from `connections`.
    #[must_use]
    pub const fn new(connections: ConnectionProvider) -> Self {
        Self { connections }
    }
}

/// Build the list query for `filter`.
///
/// Both constraints are ANDed. The limit is only applied when present.
fn list_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new("SELECT id, document FROM catalog.product");
    let mut clause = " WHERE ";

    if let Some(max_price) = filter.max_price {
        query
            .push(clause)
            .push("(document->>'price')::numeric <= ")
            .push_bind(max_price);
        clause = " AND ";
    }

    if let Some(pattern) = &filter.name_pattern {
        query
            .push(clause)
            .push("document->>'name' ~* ")
            .push_bind(pattern.clone());
    }

    query.push(" ORDER BY created_at, id");

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(i64::from(limit));
    }

    query
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let pool = self.connections.client().await?;
        let rows: Vec<ProductRow> = list_query(filter).build_query_as().fetch_all(pool).await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let pool = self.connections.client().await?;
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, document
            FROM catalog.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, product))]
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let pool = self.connections.client().await?;
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO catalog.product (document)
            VALUES ($1)
            RETURNING id, document
            ",
        )
        .bind(Json(product.without_id()))
        .fetch_one(pool)
        .await?;

        Ok(row.into())
    }

    #[instrument(skip(self, product))]
    async fn replace(
        &self,
        id: ProductId,
        product: Product,
    ) -> Result<Option<Product>, StoreError> {
        // Matched rows count as updated even when the document is unchanged.
        let pool = self.connections.client().await?;
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE catalog.product
            SET document = $2
            WHERE id = $1
            RETURNING id, document
            ",
        )
        .bind(id)
        .bind(Json(product.without_id()))
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let pool = self.connections.client().await?;
        let result = sqlx::query("DELETE FROM catalog.product WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.connections.client().await?;
        sqlx::query("SELECT 1").fetch_one(pool).await?;
        Ok(())
    }
}
