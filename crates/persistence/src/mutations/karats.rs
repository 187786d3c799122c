// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Karat record mutations.
//!
//! Timestamps are stamped by the database with `CURRENT_TIMESTAMP`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use karat_registry::BulkStatusOutcome;
use karat_registry_domain::{ActorId, KaratRecord, NewRecord, RecordChanges, RecordId, RecordStatus};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::KaratChangeset;
use crate::diesel_schema::karats;
use crate::error::PersistenceError;
use crate::queries::karats::{count_existing, find_karat};

/// Most identifiers bound into one `IN (...)` list.
///
/// `SQLite` caps bind parameters per statement at 32766.
pub const ID_CHUNK_SIZE: usize = 10_000;

fn now() -> diesel::expression::SqlLiteral<Text> {
    sql::<Text>("CURRENT_TIMESTAMP")
}

fn to_u64(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

/// Inserts a new karat and returns it as stored.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the code is already used
/// in the division, or another error if the insert fails.
pub fn insert_karat(
    conn: &mut SqliteConnection,
    record: &NewRecord,
    actor: &ActorId,
) -> Result<KaratRecord, PersistenceError> {
    diesel::insert_into(karats::table)
        .values((
            karats::code.eq(record.code.value()),
            karats::division_ref.eq(record.division_ref.value()),
            karats::description.eq(&record.description),
            karats::standard_purity.eq(record.standard_purity),
            karats::minimum.eq(record.minimum),
            karats::maximum.eq(record.maximum),
            karats::status.eq(record.status.as_str()),
            karats::created_by.eq(actor.value()),
        ))
        .execute(conn)?;

    let karat_id: i64 = get_last_insert_rowid(conn)?;
    info!(karat_id, code = %record.code, "Inserted karat row");

    find_karat(conn, RecordId::new(karat_id))?
        .ok_or_else(|| PersistenceError::NotFound(format!("karat {karat_id} after insert")))
}

/// Applies a partial update and returns the updated karat.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the new code/division
/// pair is taken, or another error if the update fails. Returns `Ok(None)`
/// if the karat does not exist.
pub fn update_karat(
    conn: &mut SqliteConnection,
    id: RecordId,
    changes: &RecordChanges,
    actor: &ActorId,
) -> Result<Option<KaratRecord>, PersistenceError> {
    let changeset: KaratChangeset<'_> = KaratChangeset {
        code: changes.code.as_ref().map(|c| c.value()),
        division_ref: changes.division_ref.as_ref().map(|d| d.value()),
        description: changes.description.as_deref(),
        standard_purity: changes.standard_purity,
        minimum: changes.minimum,
        maximum: changes.maximum,
        status: changes.status.as_ref().map(RecordStatus::as_str),
        updated_by: Some(actor.value()),
    };

    let affected: usize = diesel::update(karats::table.filter(karats::karat_id.eq(id.value())))
        .set((&changeset, karats::updated_at.eq(now())))
        .execute(conn)?;

    debug!(karat_id = id.value(), affected, "Updated karat row");

    if affected == 0 {
        return Ok(None);
    }
    find_karat(conn, id)
}

/// Sets or clears the soft-delete marker of a karat.
///
/// # Errors
///
/// Returns an error if the update fails. Returns `Ok(None)` if the karat
/// does not exist.
pub fn set_karat_deleted(
    conn: &mut SqliteConnection,
    id: RecordId,
    deleted: bool,
    actor: &ActorId,
) -> Result<Option<KaratRecord>, PersistenceError> {
    let target = karats::table.filter(karats::karat_id.eq(id.value()));

    let affected: usize = if deleted {
        diesel::update(target)
            .set((
                karats::deleted_at.eq(sql::<Nullable<Text>>("CURRENT_TIMESTAMP")),
                karats::deleted_by.eq(Some(actor.value())),
                karats::updated_by.eq(Some(actor.value())),
                karats::updated_at.eq(now()),
            ))
            .execute(conn)?
    } else {
        diesel::update(target)
            .set((
                karats::deleted_at.eq(None::<String>),
                karats::deleted_by.eq(None::<String>),
                karats::updated_by.eq(Some(actor.value())),
                karats::updated_at.eq(now()),
            ))
            .execute(conn)?
    };

    debug!(karat_id = id.value(), deleted, affected, "Set karat delete marker");

    if affected == 0 {
        return Ok(None);
    }
    find_karat(conn, id)
}

/// Permanently removes karats and returns how many rows were deleted.
///
/// Identifiers are bound in chunks of [`ID_CHUNK_SIZE`] inside one
/// transaction.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn delete_karats(conn: &mut SqliteConnection, ids: &[RecordId]) -> Result<u64, PersistenceError> {
    let raw_ids: Vec<i64> = ids.iter().map(RecordId::value).collect();

    let deleted: usize = conn.transaction::<usize, PersistenceError, _>(|conn| {
        let mut deleted: usize = 0;
        for chunk in raw_ids.chunks(ID_CHUNK_SIZE) {
            deleted +=
                diesel::delete(karats::table.filter(karats::karat_id.eq_any(chunk))).execute(conn)?;
        }
        Ok(deleted)
    })?;

    info!(requested = raw_ids.len(), deleted, "Deleted karat rows");
    Ok(to_u64(deleted))
}

/// Sets the status of every listed karat in one transaction.
///
/// Identifiers are bound in chunks of [`ID_CHUNK_SIZE`].
///
/// Karats already in the target status are matched but not modified, and
/// keep their `updated_by`/`updated_at` stamps.
///
/// # Errors
///
/// Returns an error if the transaction fails.
pub fn set_karats_status(
    conn: &mut SqliteConnection,
    ids: &[RecordId],
    status: RecordStatus,
    actor: &ActorId,
) -> Result<BulkStatusOutcome, PersistenceError> {
    let raw_ids: Vec<i64> = ids.iter().map(RecordId::value).collect();

    let outcome: BulkStatusOutcome =
        conn.transaction::<BulkStatusOutcome, PersistenceError, _>(|conn| {
            let mut outcome: BulkStatusOutcome = BulkStatusOutcome::default();

            for chunk in raw_ids.chunks(ID_CHUNK_SIZE) {
                let matched: i64 = count_existing(conn, chunk)?;

                let modified: usize = diesel::update(
                    karats::table
                        .filter(karats::karat_id.eq_any(chunk))
                        .filter(karats::status.ne(status.as_str())),
                )
                .set((
                    karats::status.eq(status.as_str()),
                    karats::updated_by.eq(Some(actor.value())),
                    karats::updated_at.eq(now()),
                ))
                .execute(conn)?;

                outcome.matched_count += u64::try_from(matched).unwrap_or(0);
                outcome.modified_count += to_u64(modified);
            }

            Ok(outcome)
        })?;

    info!(
        requested = raw_ids.len(),
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        status = %status,
        "Set karat status"
    );
    Ok(outcome)
}
