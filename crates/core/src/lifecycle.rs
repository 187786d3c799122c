// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-record lifecycle operations.
//!
//! Every write goes through the same sequence: load (for existing records),
//! validate, check uniqueness when the `(code, division)` pair moves, then
//! commit. A failed validation never reaches the store.

use karat_registry_domain::{
    ActorId, Code, DivisionRef, DomainError, KaratRecord, NewRecord, RecordChanges, RecordFields,
    RecordId, RecordStatus, validate_create, validate_update,
};
use tracing::{debug, info};

use crate::error::{CoreError, StoreError};
use crate::store::{
    PageRequest, Pagination, QueryResult, RecordFilter, RecordPage, RecordQuery, RecordStore,
    SortOrder,
};
use crate::uniqueness::code_exists;

fn duplicate_code(code: &Code, division: &DivisionRef) -> CoreError {
    CoreError::DomainViolation(DomainError::DuplicateCode {
        code: code.value().to_string(),
        division_ref: division.value().to_string(),
    })
}

/// Maps a store write failure, turning a unique-constraint hit into
/// `DuplicateCode` for the pair that was being written.
fn map_write_error(err: StoreError, code: &Code, division: &DivisionRef) -> CoreError {
    match err {
        StoreError::UniqueViolation(_) => duplicate_code(code, division),
        other => CoreError::Store(other),
    }
}

/// Loads a record that must exist and must not be soft-deleted.
fn load_live<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
) -> Result<KaratRecord, CoreError> {
    let record: KaratRecord = store
        .find_record(id)?
        .ok_or(DomainError::RecordNotFound(id))?;

    if record.is_deleted() {
        return Err(DomainError::RecordDeleted(id).into());
    }

    Ok(record)
}

/// Commits validated changes to a live record.
fn apply_changes<S: RecordStore + ?Sized>(
    store: &mut S,
    current: &KaratRecord,
    changes: &RecordChanges,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let (code, division) = changes.resolved_scope(current);

    if changes.changes_scope(current)
        && code_exists(store, code.value(), division, Some(current.id))?
    {
        return Err(duplicate_code(code, division));
    }

    let updated: KaratRecord = store
        .update_record(current.id, changes, actor)
        .map_err(|e| map_write_error(e, code, division))?
        .ok_or(DomainError::RecordNotFound(current.id))?;

    info!(
        karat_id = updated.id.value(),
        code = %updated.code,
        division = %updated.division_ref,
        status = %updated.status,
        actor = %actor,
        "Updated karat"
    );

    Ok(updated)
}

/// The single status transition shared by [`set_status`] and
/// [`toggle_status`].
fn transition_status<S: RecordStore + ?Sized>(
    store: &mut S,
    current: &KaratRecord,
    status: RecordStatus,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let updated: KaratRecord =
        apply_changes(store, current, &RecordChanges::status_only(status), actor)?;

    debug!(
        karat_id = updated.id.value(),
        from = %current.status,
        to = %updated.status,
        "Transitioned karat status"
    );

    Ok(updated)
}

/// Creates a new record.
///
/// # Arguments
///
/// * `store` - The record store
/// * `fields` - The full candidate field set
/// * `actor` - The actor creating the record
///
/// # Returns
///
/// The record as stored, with `created_by` set to `actor`. The status is
/// `active` unless the field set names another.
///
/// # Errors
///
/// Returns an error if:
/// - Any validation rule fails
/// - The code is already used within the division (`DuplicateCode`)
/// - The store fails
pub fn create_record<S: RecordStore + ?Sized>(
    store: &mut S,
    fields: &RecordFields,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let record: NewRecord = validate_create(fields)?;

    if code_exists(store, record.code.value(), &record.division_ref, None)? {
        return Err(duplicate_code(&record.code, &record.division_ref));
    }

    let stored: KaratRecord = store
        .insert_record(&record, actor)
        .map_err(|e| map_write_error(e, &record.code, &record.division_ref))?;

    info!(
        karat_id = stored.id.value(),
        code = %stored.code,
        division = %stored.division_ref,
        actor = %actor,
        "Created karat"
    );

    Ok(stored)
}

/// Retrieves a record by ID.
///
/// Soft-deleted records are still returned; check
/// [`KaratRecord::is_deleted`].
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if no record has this ID, or a
/// store error if the read fails.
pub fn get_record<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
) -> Result<KaratRecord, CoreError> {
    Ok(store
        .find_record(id)?
        .ok_or(DomainError::RecordNotFound(id))?)
}

/// Lists records matching a filter, one page at a time.
///
/// Filter and sort are passed to the store unchanged.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_records<S: RecordStore + ?Sized>(
    store: &mut S,
    filter: RecordFilter,
    sort: SortOrder,
    page: PageRequest,
) -> Result<RecordPage, CoreError> {
    let query: RecordQuery = RecordQuery {
        filter,
        sort,
        limit: Some(page.page_size()),
        offset: page.offset(),
    };

    let result: QueryResult = store.query_records(&query)?;
    debug!(
        returned = result.records.len(),
        total = result.total_count,
        page = page.page(),
        "Listed karats"
    );

    Ok(RecordPage {
        records: result.records,
        pagination: Pagination::new(page, result.total_count),
    })
}

/// Lists the active, non-deleted records of a division, sorted by code.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_by_division<S: RecordStore + ?Sized>(
    store: &mut S,
    division: &DivisionRef,
) -> Result<Vec<KaratRecord>, CoreError> {
    let query: RecordQuery = RecordQuery {
        filter: RecordFilter {
            division_ref: Some(division.clone()),
            status: Some(RecordStatus::Active),
            search: None,
            include_deleted: false,
        },
        sort: SortOrder::default(),
        limit: None,
        offset: 0,
    };

    Ok(store.query_records(&query)?.records)
}

/// Updates a record from a partial field set.
///
/// Omitted fields keep their persisted values. The minimum/maximum ordering
/// is checked on the resolved pair. Uniqueness is re-checked only when the
/// code or division actually changes. An empty field set returns the record
/// untouched, without stamping `updated_by`.
///
/// # Errors
///
/// Returns an error if:
/// - The record does not exist (`RecordNotFound`) or is soft-deleted
///   (`RecordDeleted`)
/// - Any supplied field fails validation
/// - The new `(code, division)` pair is taken (`DuplicateCode`)
/// - The store fails
pub fn update_record<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    fields: &RecordFields,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let current: KaratRecord = load_live(store, id)?;
    let changes: RecordChanges = validate_update(fields, &current)?;

    if changes.is_empty() {
        debug!(karat_id = id.value(), "Update carries no changes");
        return Ok(current);
    }

    apply_changes(store, &current, &changes, actor)
}

/// Sets a record's status.
///
/// This is the only single-record status transition; the `active` flag
/// follows from it.
///
/// # Errors
///
/// Returns an error if the record does not exist, is soft-deleted, or the
/// store fails.
pub fn set_status<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    status: RecordStatus,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let current: KaratRecord = load_live(store, id)?;
    transition_status(store, &current, status, actor)
}

/// Flips a record between `active` and `inactive`.
///
/// # Errors
///
/// Returns an error if the record does not exist, is soft-deleted, or the
/// store fails.
pub fn toggle_status<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let current: KaratRecord = load_live(store, id)?;
    transition_status(store, &current, current.status.toggled(), actor)
}

/// Soft-deletes a record.
///
/// The row is kept and stays retrievable by ID, but drops out of every
/// listing. Its code stays reserved within the division.
///
/// # Errors
///
/// Returns an error if the record does not exist, is already soft-deleted,
/// or the store fails.
pub fn soft_delete<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    load_live(store, id)?;

    let deleted: KaratRecord = store
        .set_deleted(id, true, actor)?
        .ok_or(DomainError::RecordNotFound(id))?;

    info!(karat_id = id.value(), actor = %actor, "Soft-deleted karat");
    Ok(deleted)
}

/// Clears the soft-delete marker of a record.
///
/// # Errors
///
/// Returns an error if the record does not exist, is not soft-deleted
/// (`RecordNotDeleted`), or the store fails.
pub fn restore_record<S: RecordStore + ?Sized>(
    store: &mut S,
    id: RecordId,
    actor: &ActorId,
) -> Result<KaratRecord, CoreError> {
    let current: KaratRecord = get_record(store, id)?;
    if !current.is_deleted() {
        return Err(DomainError::RecordNotDeleted(id).into());
    }

    let restored: KaratRecord = store
        .set_deleted(id, false, actor)?
        .ok_or(DomainError::RecordNotFound(id))?;

    info!(karat_id = id.value(), actor = %actor, "Restored karat");
    Ok(restored)
}

/// Permanently removes a record.
///
/// Soft-deleted records can be hard-deleted too. Afterwards the code is
/// free again within the division.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if no record has this ID, or a
/// store error if the write fails.
pub fn hard_delete<S: RecordStore + ?Sized>(store: &mut S, id: RecordId) -> Result<(), CoreError> {
    let removed: u64 = store.delete_records(&[id])?;
    if removed == 0 {
        return Err(DomainError::RecordNotFound(id).into());
    }

    info!(karat_id = id.value(), "Permanently deleted karat");
    Ok(())
}
