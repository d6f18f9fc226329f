//! Product route handlers.
//!
//! Each handler performs exactly one store operation and writes exactly one
//! response. Failures are converted to `AppError` at the handler boundary.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, State},
    http::{StatusCode, request::Parts},
    response::IntoResponse,
};
use catalog_core::{Product, ProductFilter, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters accepted by `GET /products`.
///
/// All values stay raw strings; [`ProductFilter::from_params`] decides what
/// counts as provided. A key given more than once is treated as absent.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub max_price: Option<String>,
    pub includes: Option<String>,
    pub limit: Option<String>,
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(Self::from_pairs(pairs))
    }
}

impl ListQuery {
    /// Collect the known keys from decoded query pairs.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            values.entry(key).or_default().push(value);
        }

        let mut single = |key: &str| match values.remove(key) {
            Some(mut found) if found.len() == 1 => found.pop(),
            _ => None,
        };

        Self {
            max_price: single("max-price"),
            includes: single("includes"),
            limit: single("limit"),
        }
    }

    /// Parse into a store filter.
    #[must_use]
    pub fn to_filter(&self) -> ProductFilter {
        ProductFilter::from_params(
            self.max_price.as_deref(),
            self.includes.as_deref(),
            self.limit.as_deref(),
        )
    }
}

/// JSON body extractor whose rejections become `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// List products, optionally filtered by price ceiling and name pattern.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, query: ListQuery) -> Result<Json<Vec<Product>>> {
    let filter = query.to_filter();
    let products = state.products().list(&filter).await?;
    tracing::debug!(count = products.len(), "Products listed");
    Ok(Json(products))
}

/// Fetch a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = ProductId::parse(&id)?;
    let product = state.products().get(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(product))
}

/// Create a product. The store assigns the id.
#[instrument(skip(state, product))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(product): JsonBody<Product>,
) -> Result<impl IntoResponse> {
    let stored = state.products().insert(product.without_id()).await?;
    if let Some(id) = stored.id {
        tracing::info!(product_id = %id, name = %stored.name, "Product created");
    }
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Replace a product's whole document. Any `_id` in the body is ignored.
#[instrument(skip(state, product))]
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(product): JsonBody<Product>,
) -> Result<Json<Product>> {
    let id = ProductId::parse(&id)?;
    let stored = state
        .products()
        .replace(id, product.without_id())
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(product_id = %id, "Product replaced");
    Ok(Json(stored))
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let id = ProductId::parse(&id)?;
    if !state.products().delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
