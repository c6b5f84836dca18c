//! Store creation and utility functions.

use std::path::PathBuf;

use hexframe::backend::NodeStore;
use hexframe::backend::database::{InMemory, Postgres, Sqlite};
use hexframe::constants::{SNAPSHOT_FILE, SQLITE_FILE};

use crate::cli::{Backend, BackendConfig};

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        "postgres://***@<unparsable-url>".to_string()
    }
}

/// Short human-readable description of the configured store.
pub fn backend_label(config: &BackendConfig) -> String {
    match config.backend {
        Backend::Sqlite => format!("sqlite ({})", data_dir(config).join(SQLITE_FILE).display()),
        Backend::Postgres => match &config.postgres_url {
            Some(url) => format!("postgres ({})", redact_postgres_url(url)),
            None => "postgres".to_string(),
        },
        Backend::Inmemory => format!(
            "inmemory ({})",
            data_dir(config).join(SNAPSHOT_FILE).display()
        ),
    }
}

/// Path of the JSON snapshot used by the in-memory store.
pub fn snapshot_path(config: &BackendConfig) -> PathBuf {
    data_dir(config).join(SNAPSHOT_FILE)
}

fn data_dir(config: &BackendConfig) -> PathBuf {
    config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Create the appropriate store based on configuration
pub async fn create_store(
    config: &BackendConfig,
) -> Result<Box<dyn NodeStore>, Box<dyn std::error::Error>> {
    let data_dir = data_dir(config);

    match config.backend {
        Backend::Sqlite => {
            tokio::fs::create_dir_all(&data_dir).await?;
            let db_path = data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite backend at {}", db_path.display());
            Ok(Box::new(Sqlite::open_sqlite(&db_path).await?))
        }
        Backend::Postgres => {
            let url = config
                .postgres_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --postgres-url or HEXFRAME_POSTGRES_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL backend at {}", display_url);

            match Postgres::connect_postgres(url).await {
                Ok(backend) => {
                    tracing::info!("Connected to PostgreSQL successfully");
                    Ok(Box::new(backend))
                }
                Err(e) => {
                    Err(format!("Failed to connect to PostgreSQL at {display_url}: {e}").into())
                }
            }
        }
        Backend::Inmemory => {
            let json_path = data_dir.join(SNAPSHOT_FILE);
            tracing::info!(
                "Using in-memory backend with persistence at {}",
                json_path.display()
            );
            Ok(Box::new(InMemory::load_from_file(&json_path).await?))
        }
    }
}
