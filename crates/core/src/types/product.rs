//! Product document type.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::id::ProductId;

/// A sellable item stored in the catalog.
///
/// Besides `name` and `price`, a product carries any number of additional
/// descriptive fields which round-trip through the store untouched.
///
/// The identifier is serialized as `_id` and is assigned by the store. Client
/// payloads may carry one, but it is never trusted: an `_id` that is not a
/// valid [`ProductId`] deserializes as `None`, and handlers strip it anyway.
///
/// ```
/// use catalog_core::Product;
/// use rust_decimal::Decimal;
///
/// let product: Product = serde_json::from_str(
///     r#"{"name": "Mug", "price": 9.99, "color": "blue"}"#,
/// ).unwrap();
///
/// assert_eq!(product.name, "Mug");
/// assert_eq!(product.price, Decimal::new(999, 2));
/// assert_eq!(product.attributes["color"], "blue");
/// assert!(product.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier. Immutable once persisted.
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<ProductId>,
    /// Display name; the `includes` list filter matches against it.
    pub name: String,
    /// Unit price, serialized as a JSON number. Numbers outside the
    /// `Decimal` range are rejected when deserializing.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Any other descriptive fields supplied by the client.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    /// Create a product with no identifier and no extra attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            attributes: Map::new(),
        }
    }

    /// Add a descriptive attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Stamp the product with a store identifier.
    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Drop any identifier, e.g. one supplied in a request payload.
    #[must_use]
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ProductId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| ProductId::parse(s).ok()))
}
