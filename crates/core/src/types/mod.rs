//! Core types for Catalog.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod cart;
pub mod filter;
pub mod id;
pub mod product;

pub use cart::CartItem;
pub use filter::ProductFilter;
pub use id::*;
pub use product::Product;
