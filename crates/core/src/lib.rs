//! Catalog Core - Shared types library.
//!
//! This crate provides the domain types used across all Catalog components:
//! - `api` - The products REST API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, products, cart items, and list filters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
