//! SQL schema definitions.
//!
//! This module contains the database schema used by SQL backends.
//! The schema is designed to be portable between SQLite and Postgres.
//!
//! The stored `schema_version` must equal [`SCHEMA_VERSION`]. The table
//! layout is unrelated to the data migrations in [`crate::migration`], which
//! rewrite map items only.

use crate::Result;
use crate::backend::errors::BackendError;

use super::{SqlxBackend, SqlxResultExt};

/// Current schema version.
///
/// Increment this when making schema changes that require migration.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL statements to create the schema tables.
///
/// Each statement uses portable SQL that works on both SQLite and PostgreSQL.
pub const CREATE_TABLES: &[&str] = &[
    // BIGINT (64-bit) used for portability between SQLite and PostgreSQL
    "CREATE TABLE IF NOT EXISTS schema_version (
        version BIGINT PRIMARY KEY
    )",
    // One row per tile. The address is split into its parts so that prefix
    // queries stay within one space. `path` is the comma separated step list,
    // empty for the root. Timestamps are milliseconds since the Unix epoch.
    "CREATE TABLE IF NOT EXISTS map_items (
        id BIGINT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        group_id BIGINT NOT NULL,
        path TEXT NOT NULL,
        depth BIGINT NOT NULL,
        parent_id BIGINT,
        item_type TEXT NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        content TEXT NOT NULL DEFAULT '',
        preview TEXT NOT NULL DEFAULT '',
        link TEXT NOT NULL DEFAULT '',
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (owner_id, group_id, path)
    )",
];

/// SQL statements to create indexes.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_map_items_parent ON map_items(parent_id)",
    "CREATE INDEX IF NOT EXISTS idx_map_items_depth ON map_items(depth)",
];

/// Initialize the database schema.
///
/// Creates tables and indexes if they don't exist. A database stamped with
/// any other schema version is rejected.
pub async fn initialize(backend: &SqlxBackend) -> Result<()> {
    let pool = backend.pool();

    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Schema creation failed: {e} - SQL: {statement}"),
                source: Some(e),
            })?;
    }

    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM schema_version")
        .fetch_optional(pool)
        .await
        .sql_context("Failed to check schema version")?;

    match row {
        None => {
            sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
                .bind(SCHEMA_VERSION)
                .execute(pool)
                .await
                .sql_context("Failed to initialize schema version")?;
        }
        Some((current,)) if current != SCHEMA_VERSION => {
            return Err(BackendError::SqlxError {
                reason: format!(
                    "Database schema v{current} is not supported (expected v{SCHEMA_VERSION})"
                ),
                source: None,
            }
            .into());
        }
        Some(_) => {}
    }

    for statement in CREATE_INDEXES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| BackendError::SqlxError {
                reason: format!("Index creation failed: {e} - SQL: {statement}"),
                source: Some(e),
            })?;
    }

    Ok(())
}
