// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record lifecycle engine for the Karat Registry.
//!
//! This crate orchestrates every state change of a karat record. It runs
//! the domain validator, resolves code uniqueness within a division, and
//! commits through the [`RecordStore`] trait. It never talks to a database
//! directly; the persistence crate provides the production store.

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

mod bulk;
mod error;
mod lifecycle;
mod store;
mod uniqueness;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use bulk::{bulk_hard_delete, bulk_update_status, resolve_record_ids};
pub use error::{CoreError, StoreError};
pub use lifecycle::{
    create_record, get_record, hard_delete, list_by_division, list_records, restore_record,
    set_status, soft_delete, toggle_status, update_record,
};
pub use store::{
    BulkStatusOutcome, DEFAULT_PAGE_SIZE, PageRequest, Pagination, QueryResult, RecordFilter,
    RecordPage, RecordQuery, RecordStore, SortDirection, SortField, SortOrder,
};
pub use uniqueness::code_exists;
