// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Connection initialization
//! - Migration execution
//! - SQLite-specific configuration (PRAGMA statements)
//! - SQLite-specific workarounds (e.g., `last_insert_rowid()`)

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked database before giving up.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Helper row struct for the unique index check.
///
/// Raw SQL is needed here as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct IndexCountRow {
    #[diesel(sql_type = BigInt)]
    unique_indexes: i64,
}

/// Returns the row ID of the last successful insert on this connection.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that the `(code, division_ref)` unique constraint exists.
///
/// The store is the final authority on code uniqueness, so a schema without
/// the constraint must not be used.
///
/// # Errors
///
/// Returns `PersistenceError::InitializationError` if the constraint is
/// missing, or a database error if the check itself fails.
pub fn verify_unique_constraint(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let unique_indexes: i64 = diesel::sql_query(
        "SELECT COUNT(*) AS unique_indexes FROM pragma_index_list('karats') \
         WHERE \"unique\" = 1 AND origin = 'u'",
    )
    .get_result::<IndexCountRow>(conn)?
    .unique_indexes;

    if unique_indexes == 0 {
        return Err(PersistenceError::InitializationError(String::from(
            "karats table has no (code, division_ref) unique constraint",
        )));
    }

    info!("SQLite karat unique constraint is present");
    Ok(())
}

/// Run pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!("Initializing SQLite database at: {}", database_url);

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    diesel::sql_query(format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"))
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;

    Ok(conn)
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}
