// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use karat_registry_domain::{Code, DivisionRef, RecordId};
use tracing::debug;

use crate::error::CoreError;
use crate::store::RecordStore;

/// Returns true if `code` is already used within `division`.
///
/// The raw code is normalized (trimmed, uppercased) before lookup, so the
/// check is case-insensitive. On the update path pass the record's own ID
/// as `exclude` so it does not collide with itself.
///
/// This is an early rejection only. The store's unique constraint is the
/// final authority.
///
/// # Arguments
///
/// * `store` - The record store
/// * `code` - The raw or normalized code
/// * `division` - The division scope
/// * `exclude` - A record to leave out of the match set
///
/// # Errors
///
/// Returns `DomainError::InvalidCode` if the code cannot be normalized, or
/// a store error if the lookup fails.
pub fn code_exists<S: RecordStore + ?Sized>(
    store: &mut S,
    code: &str,
    division: &DivisionRef,
    exclude: Option<RecordId>,
) -> Result<bool, CoreError> {
    let code: Code = Code::parse(code)?;
    let exists: bool = store.code_in_use(&code, division, exclude)?;

    debug!(
        code = %code,
        division = %division,
        exclude = ?exclude.map(|id| id.value()),
        exists,
        "Checked code uniqueness"
    );

    Ok(exists)
}
