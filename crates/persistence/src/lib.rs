// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Karat Registry.
//!
//! This crate provides the production [`RecordStore`] on top of Diesel and
//! `SQLite`. `SQLite` is bundled, so no system library is needed.
//!
//! ## Schema
//!
//! Migrations live in `migrations/` and are embedded into the binary. They
//! run on every connection open.
//!
//! The `karats` table carries a `UNIQUE (code, division_ref)` constraint.
//! It is the final authority on code uniqueness: a write that violates it
//! fails with [`StoreError::UniqueViolation`] even if the lifecycle layer's
//! early check passed.
//!
//! ## Testing
//!
//! - `Persistence::new_in_memory()` gives every caller an isolated database
//! - File-backed databases run in WAL mode

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use karat_registry::{BulkStatusOutcome, QueryResult, RecordQuery, RecordStore, StoreError};
use karat_registry_domain::{
    ActorId, Code, DivisionRef, KaratRecord, NewRecord, RecordChanges, RecordId, RecordStatus,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed karat record store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared-cache database, so instances never
    /// see each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_karat_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_unique_constraint(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_unique_constraint(&mut conn)?;

        Ok(Self { conn })
    }
}

impl RecordStore for Persistence {
    fn insert_record(
        &mut self,
        record: &NewRecord,
        actor: &ActorId,
    ) -> Result<KaratRecord, StoreError> {
        Ok(mutations::insert_karat(&mut self.conn, record, actor)?)
    }

    fn find_record(&mut self, id: RecordId) -> Result<Option<KaratRecord>, StoreError> {
        Ok(queries::find_karat(&mut self.conn, id)?)
    }

    fn code_in_use(
        &mut self,
        code: &Code,
        division: &DivisionRef,
        exclude: Option<RecordId>,
    ) -> Result<bool, StoreError> {
        Ok(queries::code_in_use(&mut self.conn, code, division, exclude)?)
    }

    fn query_records(&mut self, query: &RecordQuery) -> Result<QueryResult, StoreError> {
        Ok(queries::query_karats(&mut self.conn, query)?)
    }

    fn update_record(
        &mut self,
        id: RecordId,
        changes: &RecordChanges,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError> {
        Ok(mutations::update_karat(&mut self.conn, id, changes, actor)?)
    }

    fn set_deleted(
        &mut self,
        id: RecordId,
        deleted: bool,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError> {
        Ok(mutations::set_karat_deleted(
            &mut self.conn,
            id,
            deleted,
            actor,
        )?)
    }

    fn delete_records(&mut self, ids: &[RecordId]) -> Result<u64, StoreError> {
        Ok(mutations::delete_karats(&mut self.conn, ids)?)
    }

    fn set_status_many(
        &mut self,
        ids: &[RecordId],
        status: RecordStatus,
        actor: &ActorId,
    ) -> Result<BulkStatusOutcome, StoreError> {
        Ok(mutations::set_karats_status(
            &mut self.conn,
            ids,
            status,
            actor,
        )?)
    }
}
