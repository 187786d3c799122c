// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate request DTOs into domain inputs, call the lifecycle
//! engine, and wrap the result in an [`ApiResponse`]. They are synchronous
//! and take the store by mutable reference; the server serializes access.

use std::str::FromStr;

use karat_registry::{
    BulkStatusOutcome, PageRequest, RecordFilter, RecordPage, RecordStore, SortDirection,
    SortField, SortOrder, bulk_hard_delete, bulk_update_status, create_record, get_record,
    hard_delete, list_by_division, list_records, restore_record, soft_delete, toggle_status,
    update_record,
};
use karat_registry_domain::{
    ActorId, DivisionRef, KaratRecord, RecordFields, RecordId, RecordStatus,
};
use karat_registry_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ApiResponse, BulkDeleteRequest, BulkDeleteResponse, BulkStatusRequest, BulkStatusResponse,
    IdInput, KaratFieldsRequest, KaratInfo, ListKaratsRequest, PaginationInfo,
};

/// Parses a path identifier with the store's identifier format.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the identifier is malformed.
pub fn parse_karat_id(persistence: &Persistence, raw: &str) -> Result<RecordId, ApiError> {
    persistence
        .parse_record_id(raw.trim())
        .ok_or_else(|| ApiError::InvalidInput {
            rule: String::from("INVALID_ID_FORMAT"),
            field: String::from("id"),
            message: format!("Invalid karat ID format: {raw}"),
        })
}

fn invalid_query(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        rule: String::from("INVALID_QUERY_PARAMETER"),
        field: field.to_string(),
        message,
    }
}

fn to_infos(records: Vec<KaratRecord>) -> Vec<KaratInfo> {
    records.into_iter().map(KaratInfo::from).collect()
}

fn raw_ids(ids: Vec<IdInput>) -> Vec<String> {
    ids.into_iter().map(IdInput::into_raw).collect()
}

/// Creates a karat.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The full field set
/// * `actor` - The authenticated actor
///
/// # Errors
///
/// Returns an error if validation fails, the code is taken within the
/// division, or the store fails.
pub fn create_karat(
    persistence: &mut Persistence,
    request: KaratFieldsRequest,
    actor: &ActorId,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let fields: RecordFields = request.into();
    let record: KaratRecord =
        create_record(persistence, &fields, actor).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karat created successfully",
        KaratInfo::from(record),
    ))
}

/// Retrieves a karat by ID.
///
/// Soft-deleted karats are returned with their deletion marker.
///
/// # Errors
///
/// Returns an error if the ID is malformed, no karat has it, or the store
/// fails.
pub fn get_karat(
    persistence: &mut Persistence,
    raw_id: &str,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    let record: KaratRecord = get_record(persistence, id).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karat retrieved successfully",
        KaratInfo::from(record),
    ))
}

/// Lists karats with filters, sorting and pagination.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The list parameters
/// * `max_page_size` - Upper bound for the page size
///
/// # Errors
///
/// Returns an error if a filter or sort parameter is malformed, or the
/// store fails.
pub fn list_karats(
    persistence: &mut Persistence,
    request: ListKaratsRequest,
    max_page_size: u64,
) -> Result<ApiResponse<Vec<KaratInfo>>, ApiError> {
    let division_ref: Option<DivisionRef> = request
        .division_ref
        .as_deref()
        .map(DivisionRef::parse)
        .transpose()
        .map_err(translate_domain_error)?;
    let status: Option<RecordStatus> = request
        .status
        .as_deref()
        .map(str::parse::<RecordStatus>)
        .transpose()
        .map_err(translate_domain_error)?;
    let field: SortField = request
        .sort_by
        .as_deref()
        .map(SortField::from_str)
        .transpose()
        .map_err(|e| invalid_query("sort_by", e))?
        .unwrap_or_default();
    let direction: SortDirection = request
        .sort_order
        .as_deref()
        .map(SortDirection::from_str)
        .transpose()
        .map_err(|e| invalid_query("sort_order", e))?
        .unwrap_or_default();

    let filter: RecordFilter = RecordFilter {
        division_ref,
        status,
        search: request.search,
        include_deleted: request.include_deleted.unwrap_or(false),
    };
    let page: PageRequest = PageRequest::new(request.page, request.page_size, max_page_size);

    let result: RecordPage = list_records(
        persistence,
        filter,
        SortOrder { field, direction },
        page,
    )
    .map_err(translate_core_error)?;

    Ok(
        ApiResponse::ok("Karats retrieved successfully", to_infos(result.records))
            .with_pagination(PaginationInfo::from(result.pagination)),
    )
}

/// Lists the active karats of a division, sorted by code.
///
/// # Errors
///
/// Returns an error if the division is malformed or the store fails.
pub fn list_karats_by_division(
    persistence: &mut Persistence,
    division_ref: &str,
) -> Result<ApiResponse<Vec<KaratInfo>>, ApiError> {
    let division: DivisionRef = DivisionRef::parse(division_ref).map_err(translate_domain_error)?;
    let records: Vec<KaratRecord> =
        list_by_division(persistence, &division).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karats retrieved successfully",
        to_infos(records),
    ))
}

/// Updates a karat from a partial field set.
///
/// # Errors
///
/// Returns an error if the ID is malformed, the karat is missing or
/// soft-deleted, validation fails, the new code is taken, or the store
/// fails.
pub fn update_karat(
    persistence: &mut Persistence,
    raw_id: &str,
    request: KaratFieldsRequest,
    actor: &ActorId,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    let fields: RecordFields = request.into();
    let record: KaratRecord =
        update_record(persistence, id, &fields, actor).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karat updated successfully",
        KaratInfo::from(record),
    ))
}

/// Flips a karat between `active` and `inactive`.
///
/// # Errors
///
/// Returns an error if the ID is malformed, the karat is missing or
/// soft-deleted, or the store fails.
pub fn toggle_karat_status(
    persistence: &mut Persistence,
    raw_id: &str,
    actor: &ActorId,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    let record: KaratRecord =
        toggle_status(persistence, id, actor).map_err(translate_core_error)?;

    let verb: &str = if record.is_active() {
        "activated"
    } else {
        "deactivated"
    };
    Ok(ApiResponse::ok(
        &format!("Karat {verb} successfully"),
        KaratInfo::from(record),
    ))
}

/// Soft-deletes a karat.
///
/// # Errors
///
/// Returns an error if the ID is malformed, the karat is missing or already
/// soft-deleted, or the store fails.
pub fn soft_delete_karat(
    persistence: &mut Persistence,
    raw_id: &str,
    actor: &ActorId,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    let record: KaratRecord = soft_delete(persistence, id, actor).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karat deleted successfully",
        KaratInfo::from(record),
    ))
}

/// Restores a soft-deleted karat.
///
/// # Errors
///
/// Returns an error if the ID is malformed, the karat is missing or not
/// soft-deleted, or the store fails.
pub fn restore_karat(
    persistence: &mut Persistence,
    raw_id: &str,
    actor: &ActorId,
) -> Result<ApiResponse<KaratInfo>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    let record: KaratRecord =
        restore_record(persistence, id, actor).map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        "Karat restored successfully",
        KaratInfo::from(record),
    ))
}

/// Permanently deletes a karat.
///
/// # Errors
///
/// Returns an error if the ID is malformed, no karat has it, or the store
/// fails.
pub fn hard_delete_karat(
    persistence: &mut Persistence,
    raw_id: &str,
) -> Result<ApiResponse<()>, ApiError> {
    let id: RecordId = parse_karat_id(persistence, raw_id)?;
    hard_delete(persistence, id).map_err(translate_core_error)?;

    Ok(ApiResponse::empty("Karat permanently deleted"))
}

/// Permanently deletes several karats.
///
/// Identifiers that do not resolve are skipped; the response reports how
/// many karats were actually removed.
///
/// # Errors
///
/// Returns an error if the identifier set is empty or contains malformed
/// identifiers, or the store fails.
pub fn bulk_delete_karats(
    persistence: &mut Persistence,
    request: BulkDeleteRequest,
) -> Result<ApiResponse<BulkDeleteResponse>, ApiError> {
    let ids: Vec<String> = raw_ids(request.ids);
    let deleted_count: u64 = bulk_hard_delete(persistence, &ids).map_err(translate_core_error)?;

    info!(requested = ids.len(), deleted_count, "Handled bulk delete");

    Ok(ApiResponse::ok(
        &format!("{deleted_count} karat(s) permanently deleted"),
        BulkDeleteResponse { deleted_count },
    ))
}

/// Sets the status of several karats.
///
/// # Errors
///
/// Returns an error if the status is invalid, the identifier set is empty or
/// contains malformed identifiers, or the store fails.
pub fn bulk_update_karat_status(
    persistence: &mut Persistence,
    request: BulkStatusRequest,
    actor: &ActorId,
) -> Result<ApiResponse<BulkStatusResponse>, ApiError> {
    let ids: Vec<String> = raw_ids(request.ids);
    let outcome: BulkStatusOutcome = bulk_update_status(persistence, &ids, &request.status, actor)
        .map_err(translate_core_error)?;

    Ok(ApiResponse::ok(
        &format!(
            "{} karat(s) matched, {} updated",
            outcome.matched_count, outcome.modified_count
        ),
        BulkStatusResponse::from(outcome),
    ))
}
