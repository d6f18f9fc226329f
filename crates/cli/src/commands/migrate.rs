//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! catalog-cli migrate
//! ```
//!
//! Migration files live in `crates/api/migrations/` and are embedded at
//! compile time.

use super::{CommandError, connection_provider};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the connection fails, or
/// a migration fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let connections = connection_provider()?;

    tracing::info!("Connecting to catalog database...");
    let pool = connections.client().await?;

    tracing::info!("Running catalog migrations...");
    sqlx::migrate!("../api/migrations").run(pool).await?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
