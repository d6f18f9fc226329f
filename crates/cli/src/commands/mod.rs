//! CLI subcommands.

pub mod migrate;
pub mod seed;

use catalog_api::db::ConnectionProvider;
use secrecy::SecretString;
use thiserror::Error;

/// Errors shared by commands that talk to the database.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Store or connection failure.
    #[error(transparent)]
    Store(#[from] catalog_api::db::StoreError),

    /// Migration failure.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Seed file is not a JSON array of products.
    #[error("Invalid seed file: {0}")]
    InvalidSeed(#[from] serde_json::Error),
}

/// Build a connection provider from `CATALOG_DATABASE_URL` / `DATABASE_URL`.
fn connection_provider() -> Result<ConnectionProvider, CommandError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("CATALOG_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar("CATALOG_DATABASE_URL"))?;

    Ok(ConnectionProvider::new(database_url))
}
