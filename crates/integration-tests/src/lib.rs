//! Integration tests for Catalog.
//!
//! These tests drive a running `catalog-api` over HTTP, so they exercise the
//! real `PostgreSQL` store end to end.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p catalog-cli -- migrate
//!
//! # Start the server
//! cargo run -p catalog-api
//!
//! # Run integration tests
//! cargo test -p catalog-integration-tests -- --ignored
//! ```
//!
//! Set `CATALOG_BASE_URL` to point at a server other than
//! `http://localhost:3000`.

/// Base URL of the catalog server under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
