// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The store contract and the query types passed through it.

use std::str::FromStr;

use karat_registry_domain::{
    ActorId, Code, DivisionRef, KaratRecord, NewRecord, RecordChanges, RecordId,
    RecordStatus,
};

use crate::error::StoreError;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Persistent storage for karat records.
///
/// Implementations own the `(code, division)` unique constraint and must
/// report a violation as [`StoreError::UniqueViolation`] at write time. The
/// lifecycle layer checks uniqueness first, but the store is the source of
/// truth.
///
/// Every method takes `&mut self` because database connections are not
/// shareable; callers serialize access.
pub trait RecordStore {
    /// Parses an identifier in this store's storage-identifier format.
    ///
    /// Returns `None` for anything the store could never have issued.
    fn parse_record_id(&self, raw: &str) -> Option<RecordId> {
        RecordId::parse_canonical(raw)
    }

    /// Inserts a validated record and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the code is taken within the
    /// division, or another `StoreError` if the write fails.
    fn insert_record(
        &mut self,
        record: &NewRecord,
        actor: &ActorId,
    ) -> Result<KaratRecord, StoreError>;

    /// Loads a record, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. A missing record is `Ok(None)`.
    fn find_record(&mut self, id: RecordId) -> Result<Option<KaratRecord>, StoreError>;

    /// Returns true if a record other than `exclude` uses `code` in `division`.
    ///
    /// Soft-deleted records count; only a hard delete frees a code.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn code_in_use(
        &mut self,
        code: &Code,
        division: &DivisionRef,
        exclude: Option<RecordId>,
    ) -> Result<bool, StoreError>;

    /// Runs a filtered, sorted, optionally paged query.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn query_records(&mut self, query: &RecordQuery) -> Result<QueryResult, StoreError>;

    /// Applies validated changes and stamps `updated_by`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UniqueViolation` if the new `(code, division)`
    /// pair is taken, or another `StoreError` if the write fails. A missing
    /// record is `Ok(None)`.
    fn update_record(
        &mut self,
        id: RecordId,
        changes: &RecordChanges,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError>;

    /// Sets or clears the soft-delete marker and stamps `updated_by`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. A missing record is `Ok(None)`.
    fn set_deleted(
        &mut self,
        id: RecordId,
        deleted: bool,
        actor: &ActorId,
    ) -> Result<Option<KaratRecord>, StoreError>;

    /// Permanently removes records and returns how many existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_records(&mut self, ids: &[RecordId]) -> Result<u64, StoreError>;

    /// Sets the status on every listed record that exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set_status_many(
        &mut self,
        ids: &[RecordId],
        status: RecordStatus,
        actor: &ActorId,
    ) -> Result<BulkStatusOutcome, StoreError>;
}

/// Filters applied to a record query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only records in this division.
    pub division_ref: Option<DivisionRef>,
    /// Only records with this status.
    pub status: Option<RecordStatus>,
    /// Case-insensitive substring match over code and description.
    pub search: Option<String>,
    /// Include soft-deleted records. Off for every normal listing.
    pub include_deleted: bool,
}

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Code,
    Description,
    StandardPurity,
    CreatedAt,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Self::Code),
            "description" => Ok(Self::Description),
            "standard_purity" => Ok(Self::StandardPurity),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(format!("Unknown sort field '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("Unknown sort direction '{s}'")),
        }
    }
}

/// Sort order for a query. Defaults to code ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

/// A query as handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: RecordFilter,
    pub sort: SortOrder,
    /// Maximum rows to return. `None` returns everything.
    pub limit: Option<u64>,
    /// Rows to skip before the first returned row.
    pub offset: u64,
}

/// The rows of one query plus the count of all rows matching the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub records: Vec<KaratRecord>,
    pub total_count: u64,
}

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
}

impl PageRequest {
    /// Builds a page request, filling defaults and clamping the page size
    /// to `[1, max_page_size]`. Pages are 1-based; page 0 becomes page 1.
    #[must_use]
    pub fn new(page: Option<u64>, page_size: Option<u64>, max_page_size: u64) -> Self {
        let max_page_size: u64 = max_page_size.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, max_page_size),
        }
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Returns the number of rows before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata returned with a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Computes pagination metadata for a page request and a total count.
    #[must_use]
    pub const fn new(request: PageRequest, total_count: u64) -> Self {
        Self {
            page: request.page,
            page_size: request.page_size,
            total_count,
            total_pages: total_count.div_ceil(request.page_size),
        }
    }
}

/// One page of records.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub records: Vec<KaratRecord>,
    pub pagination: Pagination,
}

/// Counts reported by a bulk status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BulkStatusOutcome {
    /// Records that exist among the requested identifiers.
    pub matched_count: u64,
    /// Records whose status actually changed.
    pub modified_count: u64,
}
