// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk operations over sets of record identifiers.
//!
//! Bulk operations fail only for malformed input. Identifiers that do not
//! resolve to a record are skipped and show up in the returned counts.

use std::collections::HashSet;

use karat_registry_domain::{ActorId, DomainError, RecordId, RecordStatus};
use tracing::info;

use crate::error::CoreError;
use crate::store::{BulkStatusOutcome, RecordStore};

/// Parses a set of raw identifiers using the store's identifier format.
///
/// Duplicates are dropped; the first occurrence keeps its position, so the
/// store sees a deterministic order.
///
/// # Errors
///
/// Returns:
/// - `DomainError::IdsRequired` if `raw_ids` is empty
/// - `DomainError::InvalidIdFormat` naming every malformed identifier
pub fn resolve_record_ids<S: RecordStore + ?Sized>(
    store: &S,
    raw_ids: &[String],
) -> Result<Vec<RecordId>, DomainError> {
    if raw_ids.is_empty() {
        return Err(DomainError::IdsRequired);
    }

    let mut ids: Vec<RecordId> = Vec::with_capacity(raw_ids.len());
    let mut seen: HashSet<RecordId> = HashSet::with_capacity(raw_ids.len());
    let mut malformed: Vec<String> = Vec::new();

    for raw in raw_ids {
        match store.parse_record_id(raw.trim()) {
            Some(id) => {
                if seen.insert(id) {
                    ids.push(id);
                }
            }
            None => malformed.push(raw.clone()),
        }
    }

    if !malformed.is_empty() {
        return Err(DomainError::InvalidIdFormat { ids: malformed });
    }

    Ok(ids)
}

/// Permanently removes every record in `raw_ids`.
///
/// # Returns
///
/// The number of records actually removed. This is less than the number of
/// identifiers when some of them do not exist.
///
/// # Errors
///
/// Returns an error if the identifier set is empty or malformed, or if the
/// store fails.
pub fn bulk_hard_delete<S: RecordStore + ?Sized>(
    store: &mut S,
    raw_ids: &[String],
) -> Result<u64, CoreError> {
    let ids: Vec<RecordId> = resolve_record_ids(store, raw_ids)?;
    let deleted: u64 = store.delete_records(&ids)?;

    info!(
        requested = ids.len(),
        deleted, "Bulk permanently deleted karats"
    );

    Ok(deleted)
}

/// Sets the status of every record in `raw_ids`.
///
/// The status is checked before the identifiers.
///
/// # Returns
///
/// Separate matched and modified counts. A record already in the target
/// status is matched but not modified.
///
/// # Errors
///
/// Returns an error if:
/// - `status` is not `active` or `inactive` (`InvalidStatus`)
/// - The identifier set is empty (`IdsRequired`) or malformed
///   (`InvalidIdFormat`)
/// - The store fails
pub fn bulk_update_status<S: RecordStore + ?Sized>(
    store: &mut S,
    raw_ids: &[String],
    status: &str,
    actor: &ActorId,
) -> Result<BulkStatusOutcome, CoreError> {
    let status: RecordStatus = status.parse()?;
    let ids: Vec<RecordId> = resolve_record_ids(store, raw_ids)?;
    let outcome: BulkStatusOutcome = store.set_status_many(&ids, status, actor)?;

    info!(
        requested = ids.len(),
        matched = outcome.matched_count,
        modified = outcome.modified_count,
        status = %status,
        actor = %actor,
        "Bulk updated karat status"
    );

    Ok(outcome)
}
